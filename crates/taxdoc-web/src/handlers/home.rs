use axum::response::Html;

use crate::template;

pub async fn home() -> Html<&'static str> {
    template::render_home()
}
