//! Admin route handlers.
//!
//! Sign-in checks the submitted credentials through the injected
//! [`Authenticator`](crate::services::Authenticator) and stores an
//! [`AdminSession`] on success. The dashboard shows fixed figures; its
//! actions answer with a notice and change nothing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use hafiz_sajid_core::{CustomerId, Price, ProductId, catalog};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::dashboard::{self, AdminAction, Period, STATS, Tab};
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::forms::{LoginErrors, LoginForm};
use crate::layout::Layout;
use crate::middleware::{
    OptionalAdmin, RequireAdmin, clear_current_admin, remember_me_expiry, set_current_admin,
};
use crate::models::{AdminSession, Flash, set_flash};
use crate::routes::cart::wants_fragment;
use crate::services::{AuthError, FormKind};
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome back, Hafiz Sajid!";
pub const SIGNED_OUT_MESSAGE: &str = "You have been signed out";
pub const LOGIN_PENDING_MESSAGE: &str = "A sign-in for this account is already in progress.";
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this product?";

// =============================================================================
// Login
// =============================================================================

/// Admin login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub remember_me: bool,
    pub errors: LoginErrors,
}

impl LoginTemplate {
    fn new(layout: Layout, form: &LoginForm, errors: LoginErrors) -> Self {
        Self {
            layout,
            email: form.email.clone(),
            remember_me: form.remember_me.is_some(),
            errors,
        }
    }
}

/// Display the login page. Signed-in admins go straight to the dashboard.
#[instrument(skip(layout, admin))]
pub async fn login_page(layout: Layout, OptionalAdmin(admin): OptionalAdmin) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin/dashboard").into_response();
    }
    LoginTemplate::new(layout, &LoginForm::default(), LoginErrors::default()).into_response()
}

/// Handle a login attempt.
#[instrument(skip(state, session, layout, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            let page = LoginTemplate::new(layout, &form, errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let Some(_guard) = state
        .in_flight()
        .begin(FormKind::AdminLogin, &credentials.email)
    else {
        tracing::warn!("Login refused while another attempt is pending");
        let errors = LoginErrors {
            email: Some(LOGIN_PENDING_MESSAGE),
            password: None,
        };
        let page = LoginTemplate::new(layout, &form, errors);
        return Ok((AppError::SubmissionPending.status(), page).into_response());
    };

    match state.authenticator().authenticate(&credentials).await {
        Ok(identity) => {
            let admin = AdminSession {
                email: identity.email.to_string(),
                signed_in_at: Utc::now(),
                remember_me: credentials.remember_me,
            };
            set_current_admin(&session, &admin).await?;
            if credentials.remember_me {
                session.set_expiry(Some(remember_me_expiry()));
            }
            set_sentry_user(&admin.email);
            add_breadcrumb("auth", "Admin signed in", None);
            tracing::info!(remember_me = admin.remember_me, "Admin signed in");
            set_flash(&session, Flash::success(WELCOME_MESSAGE)).await?;
            Ok(Redirect::to("/admin/dashboard").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Admin login rejected");
            let page = LoginTemplate::new(layout, &form, LoginErrors::invalid_credentials());
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(err) => {
            let err = AppError::from(err);
            tracing::error!(error = %err, "Admin login failed");
            let page = LoginTemplate::new(layout, &form, LoginErrors::unavailable());
            Ok((err.status(), page).into_response())
        }
    }
}

/// Sign out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    set_flash(&session, Flash::success(SIGNED_OUT_MESSAGE)).await?;
    Ok(Redirect::to("/admin/login"))
}

// =============================================================================
// Dashboard
// =============================================================================

/// Tab and period query parameters. Unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub period: Option<String>,
}

impl DashboardQuery {
    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
            .as_deref()
            .and_then(|tab| tab.parse().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn period(&self) -> Period {
        self.period
            .as_deref()
            .and_then(|period| period.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct TabLink {
    pub label: &'static str,
    pub icon: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct PeriodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: &'static str,
    pub customer: &'static str,
    pub date: &'static str,
    pub amount: String,
    pub status: &'static str,
    pub badge_class: &'static str,
    pub items: u32,
}

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub category: &'static str,
    pub price: String,
    pub in_stock: bool,
    pub stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub initial: char,
    pub orders: u32,
    pub spent: String,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub admin_email: String,
    pub greeting: &'static str,
    pub tab: &'static str,
    pub tabs: Vec<TabLink>,
    pub period_label: &'static str,
    pub periods: Vec<PeriodOption>,
    pub stats: Vec<StatCard>,
    pub orders: Vec<OrderRow>,
    pub low_stock: Vec<ProductRow>,
    pub products: Vec<ProductRow>,
    pub customers: Vec<CustomerRow>,
}

fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total Products",
            value: STATS.total_products.to_string(),
            icon: "📦",
        },
        StatCard {
            label: "Total Orders",
            value: STATS.total_orders.to_string(),
            icon: "🛒",
        },
        StatCard {
            label: "Total Customers",
            value: STATS.total_customers.to_string(),
            icon: "👥",
        },
        StatCard {
            label: "Revenue",
            value: Price::from_whole(STATS.total_revenue).to_string(),
            icon: "💰",
        },
        StatCard {
            label: "Pending Orders",
            value: STATS.pending_orders.to_string(),
            icon: "⏳",
        },
        StatCard {
            label: "Out of Stock",
            value: STATS.out_of_stock.to_string(),
            icon: "⚠️",
        },
    ]
}

fn product_row(product: &catalog::Product, stock: Option<u32>) -> ProductRow {
    ProductRow {
        id: product.id.as_i32(),
        name: product.name.clone(),
        image: product.image.clone(),
        category: product.category.name(),
        price: product.price.to_string(),
        in_stock: product.in_stock,
        stock,
    }
}

impl DashboardTemplate {
    fn new(layout: Layout, admin: &AdminSession, tab: Tab, period: Period) -> Self {
        let tabs = Tab::ALL
            .iter()
            .map(|t| TabLink {
                label: t.label(),
                icon: t.icon(),
                href: format!("/admin/dashboard?tab={t}&period={period}"),
                active: *t == tab,
            })
            .collect();
        let periods = Period::ALL
            .iter()
            .map(|p| PeriodOption {
                value: p.as_str(),
                label: p.label(),
                selected: *p == period,
            })
            .collect();
        let orders = dashboard::RECENT_ORDERS
            .iter()
            .map(|order| OrderRow {
                id: order.id,
                customer: order.customer,
                date: order.date,
                amount: Price::from_whole(order.amount).to_string(),
                status: order.status.label(),
                badge_class: order.status.badge_class(),
                items: order.items,
            })
            .collect();
        let low_stock = dashboard::low_stock()
            .iter()
            .map(|row| product_row(row.product, Some(row.stock)))
            .collect();
        let products = catalog::products()
            .iter()
            .map(|product| product_row(product, None))
            .collect();
        let customers = dashboard::customers()
            .into_iter()
            .map(|customer| CustomerRow {
                id: customer.id.as_i32(),
                name: customer.name,
                email: customer.email,
                initial: customer.initial,
                orders: customer.orders,
                spent: customer.spent.to_string(),
            })
            .collect();

        Self {
            layout,
            admin_email: admin.email.clone(),
            greeting: WELCOME_MESSAGE,
            tab: tab.as_str(),
            tabs,
            period_label: period.label(),
            periods,
            stats: stat_cards(),
            orders,
            low_stock,
            products,
            customers,
        }
    }
}

/// Display the dashboard.
#[instrument(skip(layout, admin))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    layout: Layout,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    DashboardTemplate::new(layout, &admin, query.tab(), query.period())
}

// =============================================================================
// Mock actions
// =============================================================================

/// Notice fragment returned by dashboard actions.
#[derive(Template, WebTemplate)]
#[template(path = "partials/admin_notice.html")]
pub struct NoticeTemplate {
    pub success: bool,
    pub message: String,
}

/// Optional confirmation flag sent with destructive actions.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirm: String,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    let id: ProductId = raw
        .trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("Product {raw}")))?;
    catalog::product(id).ok_or_else(|| AppError::NotFound(format!("Product {raw}")))?;
    Ok(id)
}

fn parse_order_id(raw: &str) -> Result<String> {
    dashboard::order(raw)
        .map(|order| order.id.to_string())
        .ok_or_else(|| AppError::NotFound(format!("Order {raw}")))
}

fn parse_customer_id(raw: &str) -> Result<CustomerId> {
    raw.trim()
        .parse::<CustomerId>()
        .ok()
        .filter(|id| dashboard::customers().iter().any(|c| c.id == *id))
        .ok_or_else(|| AppError::NotFound(format!("Customer {raw}")))
}

/// Report an action back to the admin.
///
/// Fragment requests get the notice inline; plain form posts get it as a
/// flash on the dashboard.
async fn report(
    session: &Session,
    headers: &HeaderMap,
    action: &AdminAction,
    confirmed: bool,
) -> Result<Response> {
    let (success, message, status) = if action.needs_confirmation() && !confirmed {
        (false, CONFIRM_DELETE_MESSAGE.to_string(), StatusCode::BAD_REQUEST)
    } else {
        tracing::info!(action = action.name(), "Dashboard action requested");
        add_breadcrumb("admin", action.name(), None);
        (true, action.notice(), StatusCode::OK)
    };

    if wants_fragment(headers) {
        return Ok((status, NoticeTemplate { success, message }).into_response());
    }

    let flash = if success {
        Flash::success(message)
    } else {
        Flash::error(message)
    };
    set_flash(session, flash).await?;
    let tab = match action {
        AdminAction::EditProduct(_)
        | AdminAction::DeleteProduct(_)
        | AdminAction::RestockProduct(_) => Tab::Products,
        AdminAction::ViewOrder(_) | AdminAction::UpdateOrder(_) => Tab::Orders,
        AdminAction::ViewCustomer(_) => Tab::Customers,
    };
    Ok(Redirect::to(&format!("/admin/dashboard?tab={tab}")).into_response())
}

#[instrument(skip(session, headers, _admin))]
pub async fn edit_product(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let action = AdminAction::EditProduct(parse_product_id(&id)?);
    report(&session, &headers, &action, true).await
}

#[instrument(skip(session, headers, _admin, form))]
pub async fn delete_product(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> Result<Response> {
    let action = AdminAction::DeleteProduct(parse_product_id(&id)?);
    report(&session, &headers, &action, form.confirm == "true").await
}

#[instrument(skip(session, headers, _admin))]
pub async fn restock_product(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let action = AdminAction::RestockProduct(parse_product_id(&id)?);
    report(&session, &headers, &action, true).await
}

#[instrument(skip(session, headers, _admin))]
pub async fn view_order(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let action = AdminAction::ViewOrder(parse_order_id(&id)?);
    report(&session, &headers, &action, true).await
}

#[instrument(skip(session, headers, _admin))]
pub async fn update_order(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let action = AdminAction::UpdateOrder(parse_order_id(&id)?);
    report(&session, &headers, &action, true).await
}

#[instrument(skip(session, headers, _admin))]
pub async fn view_customer(
    session: Session,
    headers: HeaderMap,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let action = AdminAction::ViewCustomer(parse_customer_id(&id)?);
    report(&session, &headers, &action, true).await
}
