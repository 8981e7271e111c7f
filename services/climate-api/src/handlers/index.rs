//! Route listing served at the root path.

use axum::response::Html;

/// GET / - HTML listing of the available routes.
pub async fn index_handler() -> Html<&'static str> {
    Html(
        "Available routes:<br>\
         /api/v1.0/precipitation<br>\
         /api/v1.0/stations<br>\
         /api/v1.0/tobs<br>\
         /api/v1.0/&lt;start&gt;  <em>---&gt;date format is yyyy-mm-dd</em><br>\
         /api/v1.0/&lt;start&gt;/&lt;end&gt;  <em>---&gt;date format is yyyy-mm-dd</em><br>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_all_routes() {
        let Html(body) = index_handler().await;
        assert!(body.contains("/api/v1.0/precipitation"));
        assert!(body.contains("/api/v1.0/stations"));
        assert!(body.contains("/api/v1.0/tobs"));
        assert!(body.contains("yyyy-mm-dd"));
    }
}
