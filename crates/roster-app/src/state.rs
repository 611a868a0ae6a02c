// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{LayoutKind, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMenuVisibility {
    Hidden,
    Visible,
}

/// Confirmation dialog states. Closed -> ConfirmDelete / Edit on request,
/// either open state -> Closed on confirm or dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    ConfirmDelete(RecordId),
    Edit(RecordId),
}

impl DialogState {
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub layout: LayoutKind,
    pub selected: Option<RecordId>,
    pub dialog: DialogState,
    pub nav_menu: NavMenuVisibility,
    pub inline_menu: Option<RecordId>,
    pub status_line: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Grid,
            selected: None,
            dialog: DialogState::Closed,
            nav_menu: NavMenuVisibility::Hidden,
            inline_menu: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    ToggleNavMenu,
    OutsideInteraction,
    SelectLayout(LayoutKind),
    OpenDetail(RecordId),
    ClearDetail,
    ToggleInlineMenu(RecordId),
    RequestEdit(RecordId),
    RequestDelete(RecordId),
    ConfirmDialog,
    DismissDialog,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    NavMenuChanged(NavMenuVisibility),
    LayoutChanged(LayoutKind),
    DetailOpened(RecordId),
    DetailCleared,
    InlineMenuChanged(Option<RecordId>),
    DialogOpened(DialogState),
    DialogClosed,
    StatusUpdated(String),
    StatusCleared,
}

impl UiState {
    pub fn dispatch(&mut self, command: UiCommand) -> Vec<UiEvent> {
        match command {
            UiCommand::ToggleNavMenu => {
                self.nav_menu = match self.nav_menu {
                    NavMenuVisibility::Hidden => NavMenuVisibility::Visible,
                    NavMenuVisibility::Visible => NavMenuVisibility::Hidden,
                };
                vec![UiEvent::NavMenuChanged(self.nav_menu)]
            }
            UiCommand::OutsideInteraction => {
                if self.nav_menu == NavMenuVisibility::Hidden {
                    return Vec::new();
                }
                self.nav_menu = NavMenuVisibility::Hidden;
                vec![UiEvent::NavMenuChanged(self.nav_menu)]
            }
            UiCommand::SelectLayout(layout) => {
                self.layout = layout;
                vec![UiEvent::LayoutChanged(layout)]
            }
            UiCommand::OpenDetail(id) => {
                self.selected = Some(id);
                vec![UiEvent::DetailOpened(id)]
            }
            UiCommand::ClearDetail => {
                self.selected = None;
                vec![UiEvent::DetailCleared]
            }
            UiCommand::ToggleInlineMenu(id) => {
                // Toggle semantics keep at most one inline menu open.
                self.inline_menu = if self.inline_menu == Some(id) {
                    None
                } else {
                    Some(id)
                };
                vec![UiEvent::InlineMenuChanged(self.inline_menu)]
            }
            UiCommand::RequestEdit(id) => self.open_dialog(DialogState::Edit(id), id),
            UiCommand::RequestDelete(id) => self.open_dialog(DialogState::ConfirmDelete(id), id),
            UiCommand::ConfirmDialog | UiCommand::DismissDialog => {
                // Confirm performs no data mutation; both paths only close.
                if !self.dialog.is_open() {
                    return Vec::new();
                }
                self.dialog = DialogState::Closed;
                vec![UiEvent::DialogClosed]
            }
            UiCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![UiEvent::StatusUpdated(message)]
            }
            UiCommand::ClearStatus => {
                self.status_line = None;
                vec![UiEvent::StatusCleared]
            }
        }
    }

    fn open_dialog(&mut self, dialog: DialogState, id: RecordId) -> Vec<UiEvent> {
        self.selected = Some(id);
        self.dialog = dialog;
        vec![UiEvent::DetailOpened(id), UiEvent::DialogOpened(dialog)]
    }
}
