//! Contact page route handlers.
//!
//! Messages are validated, then handed to the injected
//! [`ContactSubmitter`](crate::services::ContactSubmitter). While one message
//! from an address is being delivered, a second one from the same address is
//! refused.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::content::{self, DEPARTMENTS, FAQ_CATEGORIES, Faq};
use crate::error::{AppError, Result};
use crate::forms::{ContactErrors, ContactForm, PreferredContact};
use crate::layout::Layout;
use crate::models::{Flash, set_flash};
use crate::services::FormKind;
use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str =
    "Thank you for contacting us! We will get back to you within 24 hours.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again or call us directly.";
pub const PENDING_MESSAGE: &str =
    "Your previous message is still being sent. Please wait a moment before trying again.";

// =============================================================================
// Views
// =============================================================================

/// A selectable choice (department, preferred contact, FAQ category).
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub selected: bool,
}

/// A banner above the form.
#[derive(Debug, Clone)]
pub struct Banner {
    pub success: bool,
    pub message: String,
}

/// Department query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    pub department: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactForm,
    pub errors: ContactErrors,
    pub banner: Option<Banner>,
    pub departments: Vec<ChoiceView>,
    pub preferred_contacts: Vec<ChoiceView>,
    pub faq_filters: Vec<ChoiceView>,
    pub faqs: Vec<&'static Faq>,
}

impl ContactTemplate {
    /// Build the page for `form`, filtering the FAQ by `faq_filter`.
    fn new(layout: Layout, form: ContactForm, faq_filter: &str) -> Self {
        let department = content::department(&form.department).id;
        let preferred = PreferredContact::from_form(&form.preferred_contact);
        let faq_filter = if faq_filter.trim().is_empty() {
            department
        } else {
            faq_filter.trim()
        };

        let departments = DEPARTMENTS
            .iter()
            .map(|dept| ChoiceView {
                value: dept.id,
                label: dept.name,
                icon: dept.icon,
                selected: dept.id == department,
            })
            .collect();
        let preferred_contacts = PreferredContact::ALL
            .iter()
            .map(|choice| ChoiceView {
                value: choice.as_str(),
                label: choice.label(),
                icon: choice.icon(),
                selected: *choice == preferred,
            })
            .collect();
        let faq_filters = std::iter::once("all")
            .chain(FAQ_CATEGORIES)
            .map(|category| ChoiceView {
                value: category,
                label: if category == "all" { "All Questions" } else { category },
                icon: "",
                selected: category.eq_ignore_ascii_case(faq_filter),
            })
            .collect();

        Self {
            layout,
            faqs: content::faqs_for(faq_filter),
            form,
            errors: ContactErrors::default(),
            banner: None,
            departments,
            preferred_contacts,
            faq_filters,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the contact page.
#[instrument(skip(layout))]
pub async fn show(layout: Layout, Query(query): Query<ContactQuery>) -> impl IntoResponse {
    let selected = query.department.unwrap_or_default();
    let form = ContactForm {
        department: content::department(&selected).id.to_string(),
        ..ContactForm::default()
    };
    ContactTemplate::new(layout, form, &selected)
}

/// Handle a contact form submission.
#[instrument(
    skip(state, session, layout, form),
    fields(department = %form.department, preferred_contact = %form.preferred_contact)
)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(errors) => {
            let mut page = ContactTemplate::new(layout, form, "");
            page.errors = errors;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let Some(_guard) = state
        .in_flight()
        .begin(FormKind::Contact, submission.email.as_str())
    else {
        tracing::warn!("Contact submission refused while another is pending");
        let mut page = ContactTemplate::new(layout, form, "");
        page.banner = Some(Banner {
            success: false,
            message: PENDING_MESSAGE.to_string(),
        });
        return Ok((AppError::SubmissionPending.status(), page).into_response());
    };

    match state.submitter().submit(&submission).await {
        Ok(receipt) => {
            tracing::info!(reference = %receipt.reference, "Contact message delivered");
            set_flash(&session, Flash::success(SUCCESS_MESSAGE)).await?;
            let target = format!("/contact?department={}", submission.department.id);
            Ok(Redirect::to(&target).into_response())
        }
        Err(err) => {
            let err = AppError::from(err);
            tracing::error!(error = %err, "Contact submission failed");
            let mut page = ContactTemplate::new(layout, form, "");
            page.banner = Some(Banner {
                success: false,
                message: FAILURE_MESSAGE.to_string(),
            });
            Ok((err.status(), page).into_response())
        }
    }
}
