use super::*;

use wisma_domain::PendingSubmission;

impl RoleAdminService {
    /// Validates the open form and moves it to confirmation.
    ///
    /// The confirmation question is available through
    /// [`RoleFormSession::confirmation_message`].
    pub async fn request_submit(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
    ) -> AppResult<RoleFormSession> {
        let _guard = self.lock_form(actor).await;
        let mut session = self.load_session(actor, form_id).await?;
        if let Some(form) = session.state.form() {
            permission_for_mode(form.mode()).require(actor)?;
        }

        session.state.request_submit()?;
        self.sessions
            .save(actor.subject(), session.clone())
            .await?;

        Ok(session)
    }

    /// Asks for confirmation before deleting a stored role.
    pub async fn request_delete(
        &self,
        actor: &UserIdentity,
        role_id: i64,
    ) -> AppResult<RoleFormSession> {
        AdminPermission::RoleDelete.require(actor)?;

        let role = self.find_role(role_id).await?;
        let _guard = self.lock_form(actor).await;
        let mut state = self
            .sessions
            .load(actor.subject())
            .await?
            .map(|session| session.state)
            .unwrap_or_default();
        state.request_delete(role.id, role.name)?;

        let session = RoleFormSession::new(PermissionTree::default(), state);
        self.sessions
            .save(actor.subject(), session.clone())
            .await?;

        Ok(session)
    }

    /// Dismisses the confirmation and returns to the form it came from.
    pub async fn cancel_confirmation(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
    ) -> AppResult<Option<RoleFormSession>> {
        let _guard = self.lock_form(actor).await;
        let mut session = self.load_session(actor, form_id).await?;
        session.state.cancel_confirmation()?;

        if session.state.form().is_none() {
            self.sessions.remove(actor.subject()).await?;
            return Ok(None);
        }

        self.sessions
            .save(actor.subject(), session.clone())
            .await?;

        Ok(Some(session))
    }

    /// Performs the confirmed backend call.
    ///
    /// Only one caller can move a confirmation into submission; a repeated
    /// confirm for the same form fails with a conflict.
    ///
    /// On success the form is closed. On failure a create or update form is
    /// restored with its fields and selection, a delete confirmation is
    /// dismissed, and the backend error is returned.
    pub async fn confirm(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
    ) -> AppResult<SubmissionOutcome> {
        let (mut session, pending) = {
            let _guard = self.lock_form(actor).await;
            let mut session = self.load_session(actor, form_id).await?;
            if let Some(pending) = session.state.pending() {
                permission_for_submit(pending.submit_type()).require(actor)?;
            }

            let pending = session.state.begin_submit()?;
            self.sessions
                .save(actor.subject(), session.clone())
                .await?;
            (session, pending)
        };

        let result = self.dispatch(&pending).await;
        let _guard = self.lock_form(actor).await;

        match result {
            Ok(role) => {
                let message = session.state.complete_success()?;
                self.sessions.remove(actor.subject()).await?;

                tracing::info!(
                    subject = actor.subject(),
                    submit_type = pending.submit_type().as_str(),
                    "role submission completed"
                );

                Ok(SubmissionOutcome {
                    submit_type: pending.submit_type(),
                    message,
                    role,
                })
            }
            Err(error) => {
                session.state.complete_failure()?;
                if session.state.form().is_some() {
                    self.sessions
                        .save(actor.subject(), session)
                        .await?;
                } else {
                    self.sessions.remove(actor.subject()).await?;
                }

                tracing::warn!(
                    subject = actor.subject(),
                    submit_type = pending.submit_type().as_str(),
                    error = %error,
                    "role submission failed"
                );

                Err(error)
            }
        }
    }

    async fn dispatch(&self, pending: &PendingSubmission) -> AppResult<Option<Role>> {
        match pending {
            PendingSubmission::Create(draft) => self.roles.create_role(draft).await.map(Some),
            PendingSubmission::Update { role_id, draft } => {
                self.roles.update_role(*role_id, draft).await.map(Some)
            }
            PendingSubmission::Delete { role_id, .. } => {
                self.roles.delete_role(*role_id).await.map(|()| None)
            }
        }
    }
}
