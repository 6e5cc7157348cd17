//! Static site copy for the marketing pages.
//!
//! Home and about page stats, feature highlights, team, milestones, the
//! contact page's departments, and the FAQ. Product data lives in
//! `hafiz_sajid_core::catalog`; this module only holds presentation text.

/// A headline figure such as "15+ Years Experience".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const HOME_STATS: [Stat; 4] = [
    Stat { number: "15+", label: "Years Experience", icon: "📅" },
    Stat { number: "50+", label: "Products", icon: "💊" },
    Stat { number: "10k+", label: "Happy Farmers", icon: "👨‍🌾" },
    Stat { number: "24/7", label: "Support", icon: "📞" },
];

pub const ABOUT_STATS: [Stat; 4] = [
    Stat { number: "15+", label: "Years of Excellence", icon: "📅" },
    Stat { number: "50+", label: "Premium Products", icon: "💊" },
    Stat { number: "10k+", label: "Happy Farmers", icon: "👨‍🌾" },
    Stat { number: "24/7", label: "Customer Support", icon: "📞" },
];

/// A titled blurb used for feature cards and company values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Highlight; 3] = [
    Highlight {
        icon: "✅",
        title: "Premium Quality",
        description: "All our products are tested and certified for quality",
    },
    Highlight {
        icon: "🚚",
        title: "Fast Delivery",
        description: "Quick and reliable delivery to your doorstep",
    },
    Highlight {
        icon: "👨‍⚕️",
        title: "Expert Advice",
        description: "Get professional advice from our veterinary experts",
    },
];

pub const VALUES: [Highlight; 6] = [
    Highlight {
        icon: "❤️",
        title: "Compassion",
        description: "We care deeply about the health and wellbeing of every bird",
    },
    Highlight {
        icon: "⭐",
        title: "Quality",
        description: "We never compromise on the quality of our products",
    },
    Highlight {
        icon: "🤝",
        title: "Integrity",
        description: "We believe in honest and transparent business practices",
    },
    Highlight {
        icon: "💡",
        title: "Innovation",
        description: "We continuously improve our products based on latest research",
    },
    Highlight {
        icon: "🌱",
        title: "Sustainability",
        description: "We promote sustainable poultry farming practices",
    },
    Highlight {
        icon: "📚",
        title: "Education",
        description: "We educate farmers on best practices in poultry healthcare",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
}

pub const TEAM: [TeamMember; 3] = [
    TeamMember {
        name: "Hafiz Sajid",
        role: "Founder & Chief Veterinarian",
        description: "15+ years experience in poultry healthcare",
    },
    TeamMember {
        name: "Dr. Ahmed Khan",
        role: "Senior Poultry Specialist",
        description: "Expert in poultry disease prevention",
    },
    TeamMember {
        name: "Muhammad Ali",
        role: "Quality Control Manager",
        description: "Ensuring premium quality products",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        year: "2010",
        title: "Company Founded",
        description: "Started with a small clinic in Lahore",
        icon: "🏢",
    },
    Milestone {
        year: "2013",
        title: "First Product Launch",
        description: "Introduced Poultry Shield supplement",
        icon: "🚀",
    },
    Milestone {
        year: "2016",
        title: "Expansion",
        description: "Opened 3 new branches across Punjab",
        icon: "📈",
    },
    Milestone {
        year: "2020",
        title: "Digital Transformation",
        description: "Launched online ordering system",
        icon: "💻",
    },
    Milestone {
        year: "2024",
        title: "Serving Nationwide",
        description: "Now serving farmers across Pakistan",
        icon: "🇵🇰",
    },
];

/// Contact page department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Department selected when none (or an unknown one) is given.
pub const DEFAULT_DEPARTMENT: Department = Department {
    id: "general",
    name: "General Inquiry",
    icon: "📧",
};

pub static DEPARTMENTS: [Department; 6] = [
    DEFAULT_DEPARTMENT,
    Department { id: "sales", name: "Sales", icon: "💰" },
    Department { id: "support", name: "Technical Support", icon: "🔧" },
    Department { id: "products", name: "Product Information", icon: "💊" },
    Department { id: "orders", name: "Order Status", icon: "📦" },
    Department { id: "complaints", name: "Complaints", icon: "⚠️" },
];

/// Look up a department by id, falling back to the default.
#[must_use]
pub fn department(id: &str) -> &'static Department {
    DEPARTMENTS
        .iter()
        .find(|dept| dept.id.eq_ignore_ascii_case(id.trim()))
        .unwrap_or(&DEFAULT_DEPARTMENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
}

pub static FAQS: [Faq; 6] = [
    Faq {
        question: "What are your business hours?",
        answer: "We are open Monday to Friday from 9:00 AM to 8:00 PM, and Saturday from 10:00 AM to 6:00 PM. We remain closed on Sundays.",
        category: "general",
    },
    Faq {
        question: "How can I place an order?",
        answer: "You can place orders through our website, by phone at +92 300 1234567, or by visiting our store in Lahore.",
        category: "orders",
    },
    Faq {
        question: "What payment methods do you accept?",
        answer: "We accept cash on delivery, bank transfer, Easypaisa, JazzCash, and credit/debit cards.",
        category: "payment",
    },
    Faq {
        question: "Do you offer delivery services?",
        answer: "Yes, we offer free delivery within Lahore and nominal charges for other cities across Pakistan.",
        category: "delivery",
    },
    Faq {
        question: "Are your products certified?",
        answer: "All our products are certified by the Pakistan Veterinary Medical Association and meet international quality standards.",
        category: "products",
    },
    Faq {
        question: "How can I get a refund?",
        answer: "We offer a 7-day return policy for unopened products. Please contact our support team for assistance.",
        category: "returns",
    },
];

/// FAQ filter buttons, after "All Questions".
pub const FAQ_CATEGORIES: [&str; 6] = ["general", "orders", "payment", "delivery", "products", "returns"];

/// FAQ entries for a department. `all` returns every entry.
#[must_use]
pub fn faqs_for(department: &str) -> Vec<&'static Faq> {
    let department = department.trim();
    FAQS.iter()
        .filter(|faq| department.eq_ignore_ascii_case("all") || faq.category == department)
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_faqs_filtered_by_department() {
        let orders = faqs_for("orders");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].question, "How can I place an order?");
        assert_eq!(faqs_for("all").len(), FAQS.len());
        assert!(faqs_for("complaints").is_empty());
    }

    #[test]
    fn test_unknown_department_falls_back_to_general() {
        assert_eq!(department("sales").name, "Sales");
        assert_eq!(department("billing").id, "general");
    }
}
