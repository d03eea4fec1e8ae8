//! Login to the site with email and password.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Credentials;
use crate::utils::http::Transport;

/// Title of the page served after a successful login.
pub const DASHBOARD_TITLE: &str = "Dashboard | Strava";

/// Sign in, leaving the session cookie in the transport's jar.
pub async fn login(transport: &dyn Transport, base_url: &Url, credentials: &Credentials) -> Result<()> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AppError::auth("email and password are required"));
    }

    let login_url = base_url.join("/login")?;
    let body = transport
        .get(login_url.as_str())
        .await
        .map_err(|e| AppError::auth(format!("could not load login page: {e}")))?;
    let (csrf_param, csrf_token) = csrf_tokens(&body)?;

    let form = vec![
        ("email".to_string(), credentials.email.clone()),
        ("password".to_string(), credentials.password.clone()),
        ("remember_me".to_string(), "on".to_string()),
        (csrf_param, csrf_token),
    ];
    let session_url = base_url.join("/session")?;
    let body = transport
        .post_form(session_url.as_str(), &form)
        .await
        .map_err(|e| AppError::auth(format!("could not submit credentials: {e}")))?;

    let title = page_title(&body)?;
    if title != DASHBOARD_TITLE {
        return Err(AppError::auth(format!(
            "login was unsuccessful (landed on '{title}')"
        )));
    }

    log::info!("Logged in as {}", credentials.email);
    Ok(())
}

/// Anti-forgery parameter name and token from the login page.
fn csrf_tokens(body: &str) -> Result<(String, String)> {
    let document = Html::parse_document(body);
    let meta = |name: &str| -> Result<String> {
        let selector = format!("meta[name={name}]");
        let selector =
            Selector::parse(&selector).map_err(|e| AppError::selector(&selector, format!("{e:?}")))?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
            .ok_or_else(|| AppError::auth(format!("could not find {name}")))
    };
    Ok((meta("csrf-param")?, meta("csrf-token")?))
}

fn page_title(body: &str) -> Result<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("title").map_err(|e| AppError::selector("title", format!("{e:?}")))?;
    Ok(document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default())
}
