//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to key events, and the App
//! processes them to update state and persist where required.

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick while no input is pending
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Focus & Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move focus to the next pane
    FocusNext,
    /// Move focus to the previous pane
    FocusPrev,
    /// Move to the next row in the focused pane
    NextItem,
    /// Move to the previous row in the focused pane
    PrevItem,
    /// Move to the next editable field of the current product row
    NextField,
    /// Move to the previous editable field of the current product row
    PrevField,

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Editing
    // ─────────────────────────────────────────────────────────────────────────
    /// Start editing the current product cell
    BeginEdit,
    /// Commit the edit buffer into the model
    CommitEdit,
    /// Discard the edit buffer
    CancelEdit,
    /// Move to the next input of a multi-field form
    NextInput,

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────
    /// Append a blank product row
    AddProduct,
    /// Remove the product row under the cursor
    RemoveProduct,

    // ─────────────────────────────────────────────────────────────────────────
    // Contacts
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the new-contact form
    OpenAddContact,
    /// Submit the new-contact form
    SubmitContact,
    /// Remove the contact under the cursor
    RemoveContact,
    /// Flip the selection of the contact under the cursor
    ToggleContact,
    /// Select every contact
    SelectAllContacts,
    /// Deselect every contact
    ClearContactSelection,

    // ─────────────────────────────────────────────────────────────────────────
    // Composer
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy the rendered message to the clipboard
    CopyMessage,
    /// Write the JSON data export
    ExportJson,
    /// Record the send in the history log
    ConfirmSend,

    // ─────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────
    /// Write the CSV history export
    ExportCsv,
    /// Ask for confirmation before clearing the history
    OpenClearHistory,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the quit confirmation dialog
    OpenQuitDialog,
    /// Open the keyboard shortcut reference
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
}
