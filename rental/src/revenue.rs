//! Revenue path payouts and the draft/saved editor behind the save button.

use tracing::{debug, warn};

use crate::error::{RentalError, Result};
use crate::types::{RevenuePath, RevenueSelection, RevenueTier};

/// Payout on the platform insurance path.
pub const INSURANCE_PAYOUT_PERCENT: u8 = 40;

/// Host payout in percent of gross, or `None` while the selection is incomplete.
pub fn payout_percent(path: RevenuePath, tier: Option<RevenueTier>) -> Option<u8> {
    match path {
        RevenuePath::Insurance => Some(INSURANCE_PAYOUT_PERCENT),
        RevenuePath::Tiers => tier.map(tier_payout_percent),
    }
}

fn tier_payout_percent(tier: RevenueTier) -> u8 {
    match tier {
        RevenueTier::P2p => 75,
        RevenueTier::Commercial => 90,
        RevenueTier::SelfManage => 75,
    }
}

/// `"40%"`, or `"--"` when no payout is defined yet.
pub fn format_payout(selection: &RevenueSelection) -> String {
    selection
        .revenue_path
        .and_then(|path| payout_percent(path, selection.revenue_tier))
        .map(|p| format!("{p}%"))
        .unwrap_or_else(|| "--".to_string())
}

pub fn has_unsaved_changes(draft: &RevenueSelection, saved: &RevenueSelection) -> bool {
    draft.revenue_path != saved.revenue_path || draft.revenue_tier != saved.revenue_tier
}

/// A path is chosen, and on the tiers path a tier is chosen too.
pub fn is_complete(selection: &RevenueSelection) -> bool {
    match selection.revenue_path {
        None => false,
        Some(RevenuePath::Insurance) => true,
        Some(RevenuePath::Tiers) => selection.revenue_tier.is_some(),
    }
}

/// Whether the save control is enabled.
pub fn can_save(draft: &RevenueSelection, saved: &RevenueSelection) -> bool {
    has_unsaved_changes(draft, saved) && is_complete(draft)
}

/// Editor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Unselected,
    Draft,
    Saving,
    Saved,
}

/// Draft and last-saved revenue selections for one partner.
///
/// Drafts only reach the store through [`RevenuePathEditor::save_with`]; a
/// failed save leaves the draft in place and records the error message.
#[derive(Debug, Clone)]
pub struct RevenuePathEditor {
    draft: RevenueSelection,
    saved: RevenueSelection,
    state: EditorState,
    last_error: Option<String>,
}

impl RevenuePathEditor {
    /// Start from the selection last fetched from the store.
    pub fn new(saved: RevenueSelection) -> Self {
        let state = if is_complete(&saved) {
            EditorState::Saved
        } else if saved.revenue_path.is_some() {
            EditorState::Draft
        } else {
            EditorState::Unselected
        };
        Self {
            draft: saved,
            saved,
            state,
            last_error: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn draft(&self) -> &RevenueSelection {
        &self.draft
    }

    pub fn saved(&self) -> &RevenueSelection {
        &self.saved
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Choose a path. Insurance clears any tier.
    pub fn select_path(&mut self, path: RevenuePath) {
        self.draft.revenue_path = Some(path);
        if path == RevenuePath::Insurance {
            self.draft.revenue_tier = None;
        }
        self.touch();
    }

    /// Choose a tier. Implies the tiers path.
    pub fn select_tier(&mut self, tier: RevenueTier) {
        self.draft.revenue_path = Some(RevenuePath::Tiers);
        self.draft.revenue_tier = Some(tier);
        self.touch();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        has_unsaved_changes(&self.draft, &self.saved)
    }

    pub fn can_save(&self) -> bool {
        self.state != EditorState::Saving && can_save(&self.draft, &self.saved)
    }

    /// Payout for the current draft.
    pub fn payout_percent(&self) -> Option<u8> {
        self.draft
            .revenue_path
            .and_then(|path| payout_percent(path, self.draft.revenue_tier))
    }

    /// Persist the draft through `persist`.
    ///
    /// On success the draft becomes the saved selection. On failure the editor
    /// returns to `Draft` with the error message kept for display; nothing is
    /// retried.
    pub async fn save_with<F, Fut>(&mut self, persist: F) -> Result<()>
    where
        F: FnOnce(RevenueSelection) -> Fut,
        Fut: std::future::Future<Output = Result<RevenueSelection>>,
    {
        if self.state == EditorState::Saving {
            return Err(RentalError::SaveInFlight);
        }
        if !is_complete(&self.draft) {
            return Err(RentalError::Validation(
                "choose a revenue path (and a tier on the tiers path) before saving".into(),
            ));
        }
        if !self.has_unsaved_changes() {
            return Ok(());
        }

        self.state = EditorState::Saving;
        self.last_error = None;

        match persist(self.draft).await {
            Ok(stored) => {
                debug!(
                    path = ?stored.revenue_path,
                    tier = ?stored.revenue_tier,
                    "revenue path saved"
                );
                self.saved = stored;
                self.draft = stored;
                self.state = EditorState::Saved;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "revenue path save failed");
                self.last_error = Some(e.to_string());
                self.state = EditorState::Draft;
                Err(e)
            }
        }
    }

    fn touch(&mut self) {
        self.state = if self.has_unsaved_changes() || !is_complete(&self.saved) {
            EditorState::Draft
        } else {
            EditorState::Saved
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(path: Option<RevenuePath>, tier: Option<RevenueTier>) -> RevenueSelection {
        RevenueSelection {
            revenue_path: path,
            revenue_tier: tier,
        }
    }

    #[test]
    fn test_payout_percent_table() {
        assert_eq!(payout_percent(RevenuePath::Insurance, None), Some(40));
        assert_eq!(
            payout_percent(RevenuePath::Insurance, Some(RevenueTier::Commercial)),
            Some(40)
        );
        assert_eq!(payout_percent(RevenuePath::Tiers, Some(RevenueTier::P2p)), Some(75));
        assert_eq!(
            payout_percent(RevenuePath::Tiers, Some(RevenueTier::Commercial)),
            Some(90)
        );
        assert_eq!(
            payout_percent(RevenuePath::Tiers, Some(RevenueTier::SelfManage)),
            Some(75)
        );
        assert_eq!(payout_percent(RevenuePath::Tiers, None), None);
    }

    #[test]
    fn test_format_payout() {
        assert_eq!(format_payout(&sel(None, None)), "--");
        assert_eq!(format_payout(&sel(Some(RevenuePath::Tiers), None)), "--");
        assert_eq!(format_payout(&sel(Some(RevenuePath::Insurance), None)), "40%");
    }

    #[test]
    fn test_can_save_requires_change_and_completeness() {
        let saved = sel(Some(RevenuePath::Insurance), None);
        assert!(!can_save(&saved, &saved));
        assert!(!can_save(&sel(Some(RevenuePath::Tiers), None), &saved));
        assert!(can_save(
            &sel(Some(RevenuePath::Tiers), Some(RevenueTier::P2p)),
            &saved
        ));
        assert!(!can_save(&sel(None, None), &RevenueSelection::default()));
    }

    #[test]
    fn test_editor_transitions() {
        let mut ed = RevenuePathEditor::new(RevenueSelection::default());
        assert_eq!(ed.state(), EditorState::Unselected);

        ed.select_path(RevenuePath::Tiers);
        assert_eq!(ed.state(), EditorState::Draft);
        assert!(!ed.can_save());
        assert_eq!(ed.payout_percent(), None);

        ed.select_tier(RevenueTier::Commercial);
        assert!(ed.can_save());
        assert_eq!(ed.payout_percent(), Some(90));

        ed.select_path(RevenuePath::Insurance);
        assert_eq!(ed.draft().revenue_tier, None);
        assert_eq!(ed.payout_percent(), Some(40));
    }

    #[test]
    fn test_editor_back_to_saved_when_reverted() {
        let saved = sel(Some(RevenuePath::Insurance), None);
        let mut ed = RevenuePathEditor::new(saved);
        assert_eq!(ed.state(), EditorState::Saved);
        ed.select_tier(RevenueTier::P2p);
        assert_eq!(ed.state(), EditorState::Draft);
        ed.select_path(RevenuePath::Insurance);
        assert_eq!(ed.state(), EditorState::Saved);
        assert!(!ed.can_save());
    }

    #[tokio::test]
    async fn test_editor_incomplete_stored_selection_is_draft() {
        let stored = sel(Some(RevenuePath::Tiers), None);
        let mut ed = RevenuePathEditor::new(stored);
        assert_eq!(ed.state(), EditorState::Draft);
        assert!(!ed.can_save());

        ed.select_path(RevenuePath::Tiers);
        assert_eq!(ed.state(), EditorState::Draft);

        ed.select_tier(RevenueTier::P2p);
        assert!(ed.can_save());
        ed.save_with(|s| async move { Ok(s) }).await.unwrap();
        assert_eq!(ed.state(), EditorState::Saved);
    }

    #[tokio::test]
    async fn test_save_success_becomes_saved() {
        let mut ed = RevenuePathEditor::new(RevenueSelection::default());
        ed.select_tier(RevenueTier::SelfManage);
        ed.save_with(|s| async move { Ok(s) }).await.unwrap();
        assert_eq!(ed.state(), EditorState::Saved);
        assert_eq!(ed.saved().revenue_tier, Some(RevenueTier::SelfManage));
        assert!(!ed.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_draft() {
        let saved = sel(Some(RevenuePath::Insurance), None);
        let mut ed = RevenuePathEditor::new(saved);
        ed.select_tier(RevenueTier::P2p);

        let err = ed
            .save_with(|_| async {
                Err(RentalError::Http {
                    status: 503,
                    message: "unavailable".into(),
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RentalError::Http { status: 503, .. }));
        assert_eq!(ed.state(), EditorState::Draft);
        assert_eq!(ed.saved(), &saved);
        assert_eq!(ed.draft().revenue_tier, Some(RevenueTier::P2p));
        assert!(ed.last_error().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_save_incomplete_is_rejected() {
        let mut ed = RevenuePathEditor::new(RevenueSelection::default());
        ed.select_path(RevenuePath::Tiers);
        let err = ed.save_with(|s| async move { Ok(s) }).await.unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
        assert_eq!(ed.state(), EditorState::Draft);
    }
}
