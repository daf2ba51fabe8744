use crate::drag::ClickDisposition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Shown,
}

/// Outcome of one toggle request.
///
/// `Opened` obliges the caller to recompute placement before showing the
/// panel and to focus the entry field afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelTransition {
    Opened,
    Closed,
    Suppressed,
}

#[derive(Debug, Clone, Default)]
pub struct PanelController {
    visibility: PanelVisibility,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the visibility the page already rendered.
    pub fn with_visibility(visibility: PanelVisibility) -> Self {
        Self { visibility }
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == PanelVisibility::Shown
    }

    /// Adopts visibility changed outside the controller, e.g. by page script.
    pub fn sync(&mut self, visibility: PanelVisibility) {
        if self.visibility != visibility {
            tracing::debug!(?visibility, "panel visibility changed externally");
            self.visibility = visibility;
        }
    }

    pub fn toggle(&mut self, click: ClickDisposition) -> PanelTransition {
        if click == ClickDisposition::Suppressed {
            return PanelTransition::Suppressed;
        }

        match self.visibility {
            PanelVisibility::Shown => {
                self.visibility = PanelVisibility::Hidden;
                PanelTransition::Closed
            }
            PanelVisibility::Hidden => {
                self.visibility = PanelVisibility::Shown;
                PanelTransition::Opened
            }
        }
    }
}
