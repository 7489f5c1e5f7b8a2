use actix_web::{Responder, get, web};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::domain::quote::QuoteStatus;
use crate::models::config::ServerConfig;
use crate::routes::render_template;

/// Marketing landing page with the quote request form.
#[get("/")]
pub async fn show_index(
    user: Option<AuthenticatedUser>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    context.insert("company_name", &server_config.company_name);
    context.insert("home_url", &server_config.auth_service_url);
    context.insert("current_user", &user);
    context.insert("quote_statuses", &QuoteStatus::ALL);

    render_template(&tera, "main/index.html", &context)
}
