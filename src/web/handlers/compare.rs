// POST /api/compare — score two texts against each other.
//
// Accepts either a multipart form or a JSON body:
//   multipart: file1/file2 uploads win when they carry a filename,
//              otherwise the text1/text2 fields are used
//   JSON:      { "text1": "...", "text2": "..." }
// Missing sides are treated as empty text. Uploaded bytes are decoded as
// UTF-8 with invalid sequences replaced.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use crate::similarity::comparer::TextComparer;
use crate::web::{api_error, AppState, AuthUser};

#[derive(Debug, Default, Deserialize)]
pub struct TextPair {
    #[serde(default)]
    pub text1: String,
    #[serde(default)]
    pub text2: String,
}

/// POST /api/compare — return all three scores plus fingerprints.
pub async fn compare(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    request: Request,
) -> Response {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let pair = if is_multipart {
        let multipart = match Multipart::from_request(request, &state).await {
            Ok(m) => m,
            Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
        };
        match read_multipart(multipart).await {
            Ok(pair) => pair,
            Err(message) => return api_error(StatusCode::BAD_REQUEST, &message),
        }
    } else {
        match Json::<TextPair>::from_request(request, &state).await {
            Ok(Json(pair)) => pair,
            Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
        }
    };

    let (len1, len2) = (pair.text1.chars().count(), pair.text2.chars().count());

    // Scoring is CPU-bound; keep it off the async workers
    let report = tokio::task::spawn_blocking(move || {
        TextComparer::new(&pair.text1, &pair.text2).report().stamped()
    })
    .await;

    match report {
        Ok(report) => {
            info!(
                user = %user,
                text1_chars = len1,
                text2_chars = len2,
                stylistic = report.scores.stylistic,
                jaccard = report.scores.jaccard,
                tfidf = report.scores.tfidf,
                "Compared texts"
            );
            Json(report).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Comparison task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Comparison failed")
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<TextPair, String> {
    let mut files: [Option<String>; 2] = [None, None];
    let mut fields: [Option<String>; 2] = [None, None];

    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let has_filename = field.file_name().is_some_and(|f| !f.is_empty());

        let slot = match name.as_str() {
            "file1" if has_filename => &mut files[0],
            "file2" if has_filename => &mut files[1],
            "text1" => &mut fields[0],
            "text2" => &mut fields[1],
            _ => continue,
        };
        let bytes = field.bytes().await.map_err(|e| e.body_text())?;
        *slot = Some(String::from_utf8_lossy(&bytes).into_owned());
    }

    let [file1, file2] = files;
    let [field1, field2] = fields;
    Ok(TextPair {
        text1: file1.or(field1).unwrap_or_default(),
        text2: file2.or(field2).unwrap_or_default(),
    })
}
