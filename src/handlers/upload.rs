use crate::dataset::{EntryKind, NewKnowledgeEntry};
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    presenter: Option<String>,
    team: Option<String>,
    tags: Option<String>,
    content_type: Option<String>,
    content: Option<String>,
    /// `(file name, mime type)` of an attached file; the bytes are not kept.
    file: Option<(String, String)>,
}

/// POST /api/knowledge/upload - Add a presentation, document, video or note
/// to the knowledge base searched by the general assistant.
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("unnamed").to_string();
            let mime = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            // Drain the body so the stream advances to the next field.
            field
                .bytes()
                .await
                .map_err(|e| AppError::ValidationError(format!("Failed to read file: {}", e)))?;
            form.file = Some((file_name, mime));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::ValidationError(format!("Failed to read field {}: {}", name, e)))?;
        match name.as_str() {
            "title" => form.title = Some(value),
            "presenter" => form.presenter = Some(value),
            "team" => form.team = Some(value),
            "tags" => form.tags = Some(value),
            "contentType" => form.content_type = Some(value),
            "content" => form.content = Some(value),
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    let entry = form.into_entry()?;
    let kind = entry.kind;
    let id = state.knowledge.insert(entry);

    metrics::counter!("knowledge_uploads_total", "type" => kind_label(kind)).increment(1);

    Ok(Json(UploadResponse { success: true, id }))
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Presentation => "presentation",
        EntryKind::Document => "document",
        EntryKind::Video => "video",
        EntryKind::Text => "text",
    }
}

impl UploadForm {
    fn into_entry(self) -> Result<NewKnowledgeEntry> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title cannot be empty".to_string()));
        }

        let kind = match self.content_type.as_deref().map(str::trim) {
            Some("document") => EntryKind::Document,
            Some("video") => EntryKind::Video,
            Some("text") => EntryKind::Text,
            Some(other) => {
                return Err(AppError::ValidationError(format!(
                    "contentType must be one of document, video, text (got {:?})",
                    other
                )))
            }
            None => {
                return Err(AppError::ValidationError(
                    "contentType is required".to_string(),
                ))
            }
        };

        let content = match kind {
            EntryKind::Text => self.content.unwrap_or_default(),
            _ => {
                let (name, mime) = self.file.ok_or_else(|| {
                    AppError::ValidationError("A file is required for document and video uploads".to_string())
                })?;
                format!("File uploaded: {} ({})", name, mime)
            }
        };

        let tags = self
            .tags
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Ok(NewKnowledgeEntry {
            title,
            presenter: self.presenter.unwrap_or_default(),
            team: self.team.unwrap_or_default(),
            content,
            tags,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(content_type: &str) -> UploadForm {
        UploadForm {
            title: Some("Batch Record Review".into()),
            presenter: Some("Priya".into()),
            team: Some("Quality".into()),
            tags: Some(" GxP, automation ,,".into()),
            content_type: Some(content_type.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_upload_records_name_and_mime() {
        let mut upload = form("document");
        upload.file = Some(("deck.pdf".into(), "application/pdf".into()));

        let entry = upload.into_entry().unwrap();

        assert_eq!(entry.kind, EntryKind::Document);
        assert_eq!(entry.content, "File uploaded: deck.pdf (application/pdf)");
        assert_eq!(entry.tags, vec!["GxP", "automation"]);
    }

    #[test]
    fn test_text_upload_keeps_content() {
        let mut upload = form("text");
        upload.content = Some("Notes from the session".into());

        let entry = upload.into_entry().unwrap();
        assert_eq!(entry.kind, EntryKind::Text);
        assert_eq!(entry.content, "Notes from the session");
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(form("podcast").into_entry(), Err(AppError::ValidationError(_))));
        assert!(matches!(form("video").into_entry(), Err(AppError::ValidationError(_))));

        let mut untitled = form("text");
        untitled.title = Some("  ".into());
        assert!(matches!(untitled.into_entry(), Err(AppError::ValidationError(_))));
    }
}
