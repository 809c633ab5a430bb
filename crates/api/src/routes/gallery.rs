//! Gallery page.

use std::fmt::Write as _;

use axum::{Router, extract::State, response::Html, routing::get};
use imgstore_core::{BlobStore, ObjectId};

use crate::{AppState, error::ApiError};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>imgstore</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; }
.grid figure { margin: 0; }
.grid img { width: 100%; height: 200px; object-fit: cover; border-radius: 4px; }
.grid figcaption { font-size: 0.7rem; color: #666; word-break: break-all; }
</style>
</head>
<body>
<h1>Images</h1>
<form action="/image" method="post" enctype="multipart/form-data">
<input type="file" name="image" accept="image/*" required>
<button type="submit">Upload</button>
</form>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Creates the gallery routes.
pub fn routes<S: BlobStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/", get(gallery::<S>))
}

/// Renders the page for a set of identifiers.
fn render(ids: &[ObjectId]) -> String {
    let mut page = String::from(HEAD);
    if ids.is_empty() {
        page.push_str("<p>No images yet.</p>\n");
    } else {
        page.push_str("<div class=\"grid\">\n");
        for id in ids {
            // Identifiers are hex and hyphens only, no escaping needed.
            let _ = writeln!(
                page,
                "<figure><a href=\"/image/{id}\"><img src=\"/image/{id}\" loading=\"lazy\" alt=\"{id}\"></a><figcaption>{id}</figcaption></figure>"
            );
        }
        page.push_str("</div>\n");
    }
    page.push_str(TAIL);
    page
}

/// GET `/`
async fn gallery<S: BlobStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, ApiError> {
    let mut ids = state.objects.list_all().await?;
    ids.sort();
    Ok(Html(render(&ids)))
}
