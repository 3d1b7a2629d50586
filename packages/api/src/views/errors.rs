// ABOUTME: Error pages for missing resources and internal failures

use super::layout;
use crate::paths;

pub fn not_found() -> String {
    layout(
        "Not found",
        &format!(
            r#"<h1>Not found</h1>
<p>The page you asked for does not exist.</p>
<p><a href="{}">Back to the start</a></p>"#,
            paths::LANDING
        ),
    )
}

/// Generic failure page; never includes error details
pub fn server_error() -> String {
    layout(
        "Something went wrong",
        r#"<h1>Something went wrong</h1>
<p>The request could not be completed. Please try again.</p>"#,
    )
}
