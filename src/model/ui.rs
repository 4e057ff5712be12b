//! UI state shared between the root App and components

/// The four panes of the single page. Focus cycles through them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Products,
    Contacts,
    Preview,
    History,
}

impl Pane {
    pub fn next(&self) -> Pane {
        match self {
            Pane::Products => Pane::Contacts,
            Pane::Contacts => Pane::Preview,
            Pane::Preview => Pane::History,
            Pane::History => Pane::Products,
        }
    }

    pub fn prev(&self) -> Pane {
        match self {
            Pane::Products => Pane::History,
            Pane::Contacts => Pane::Products,
            Pane::Preview => Pane::Contacts,
            Pane::History => Pane::Preview,
        }
    }
}

/// Modal overlay shown on top of the page. At most one is open at a time;
/// only the open modal receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    ConfirmQuit,
    /// "Delete the whole history?" confirmation dialog
    ConfirmClearHistory,
    /// New-contact form (name + optional phone)
    AddContact,
    /// Keyboard shortcut reference
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_visits_every_pane() {
        let mut pane = Pane::Products;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(pane);
            pane = pane.next();
        }
        assert_eq!(pane, Pane::Products);
        assert_eq!(seen.len(), 4);

        // prev undoes next
        assert_eq!(Pane::Contacts.next().prev(), Pane::Contacts);
    }
}
