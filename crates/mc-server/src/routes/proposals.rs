use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use mc_core::proposal::{self, Proposal, ProposalStatus};

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct CreateProposalBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct DecisionBody {
    #[serde(default)]
    pub note: Option<String>,
}

/// An empty body is a decision without a note.
fn parse_decision(body: &Bytes) -> Result<DecisionBody, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DecisionBody::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::bad_request(format!("invalid body: {e}")))
}

/// GET /api/proposals
pub async fn list_proposals(State(app): State<AppState>) -> Result<Json<Vec<Proposal>>, AppError> {
    let root = app.root.clone();
    Ok(Json(blocking(move || proposal::list(&root)).await?))
}

/// POST /api/proposals: an agent files a proposal for approval.
pub async fn create_proposal(
    State(app): State<AppState>,
    Json(body): Json<CreateProposalBody>,
) -> Result<Json<Proposal>, AppError> {
    let root = app.root.clone();
    let created = blocking(move || {
        proposal::add(&root, &body.title, body.description, body.source)
    })
    .await?;
    Ok(Json(created))
}

async fn decide(
    app: AppState,
    id: String,
    decision: ProposalStatus,
    body: Bytes,
) -> Result<Json<Proposal>, AppError> {
    let DecisionBody { note } = parse_decision(&body)?;
    let root = app.root.clone();
    let decided = blocking(move || proposal::decide(&root, &id, decision, note)).await?;
    Ok(Json(decided))
}

/// POST /api/proposals/:id/approve
pub async fn approve_proposal(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Proposal>, AppError> {
    decide(app, id, ProposalStatus::Approved, body).await
}

/// POST /api/proposals/:id/reject
pub async fn reject_proposal(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Proposal>, AppError> {
    decide(app, id, ProposalStatus::Rejected, body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn seeded() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        create_proposal(
            State(app.clone()),
            Json(CreateProposalBody {
                title: "Raise daily post limit".into(),
                description: "engagement is up".into(),
                source: Some("social-bot".into()),
            }),
        )
        .await
        .unwrap();
        (dir, app)
    }

    #[tokio::test]
    async fn approve_with_note() {
        let (_dir, app) = seeded().await;
        let Json(p) = approve_proposal(
            State(app),
            Path("P1".into()),
            Bytes::from_static(br#"{"note": "ok for a week"}"#),
        )
        .await
        .unwrap();
        assert_eq!(p.status, ProposalStatus::Approved);
        assert_eq!(p.decision_note.as_deref(), Some("ok for a week"));
    }

    #[tokio::test]
    async fn second_decision_conflicts() {
        let (_dir, app) = seeded().await;
        reject_proposal(State(app.clone()), Path("P1".into()), Bytes::new())
            .await
            .unwrap();
        let err = approve_proposal(State(app), Path("P1".into()), Bytes::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_proposal_is_404() {
        let (_dir, app) = seeded().await;
        let err = approve_proposal(State(app), Path("P9".into()), Bytes::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn malformed_decision_body_is_400() {
        let err = parse_decision(&Bytes::from_static(b"{nope")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
