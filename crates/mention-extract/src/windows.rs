//! Per-dialog windows of client turns for classifier mode.

use mention_core::{Role, Utterance};

/// The aggregated client-only text of one dialog, formatted for the
/// classifier as `[turn_id] text` lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogWindow {
    pub dialog_id: String,
    /// First and last client turn in the window.
    pub turn_l: u32,
    pub turn_r: u32,
    pub lines: Vec<(u32, String)>,
}

impl DialogWindow {
    /// Render the window body sent to the classifier.
    pub fn client_text(&self) -> String {
        self.lines
            .iter()
            .map(|(turn, text)| format!("[{turn}] {text}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|(_, text)| text.trim().is_empty())
    }
}

/// Group client utterances into one window per dialog, preserving the
/// input's dialog order and turn order within a dialog. Operator turns
/// never enter a window.
pub fn client_windows(utterances: &[Utterance]) -> Vec<DialogWindow> {
    let mut windows: Vec<DialogWindow> = Vec::new();

    for u in utterances {
        if u.role != Role::Client {
            continue;
        }
        match windows.iter_mut().find(|w| w.dialog_id == u.dialog_id) {
            Some(w) => {
                w.turn_l = w.turn_l.min(u.turn_id);
                w.turn_r = w.turn_r.max(u.turn_id);
                w.lines.push((u.turn_id, u.text.clone()));
            }
            None => windows.push(DialogWindow {
                dialog_id: u.dialog_id.clone(),
                turn_l: u.turn_id,
                turn_r: u.turn_id,
                lines: vec![(u.turn_id, u.text.clone())],
            }),
        }
    }

    for w in &mut windows {
        w.lines.sort_by_key(|(turn, _)| *turn);
    }
    windows
}
