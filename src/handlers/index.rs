use crate::auth::CurrentUser;
use crate::views;
use axum::response::Html;

/// Landing page, and where login and logout send the visitor.
pub async fn index(current_user: CurrentUser) -> Html<String> {
    views::landing_page(&current_user)
}
