/*
[INPUT]:  Button events, file_url input, task progress updates
[OUTPUT]: Welcome screen transitions and progress indicator rendering
[POS]:    State variant - the machine's entry screen
[UPDATE]: When buttons, download handling, or the indicator change
*/

use screenflow_core::{
    EVENT_EXIT,
    EVENT_PROGRESS,
    InputValues,
    Layout,
    PROGRESS_KEY,
    State,
    Transition,
    Widget,
};

use super::{DOWNLOAD, FILE_URL_KEY, GO_TO_STATE_A, GO_TO_STATE_B, GO_TO_STATE_C};

/// Entry screen. Owns the download progress indicator: the indicator shows
/// on the first progress report and hides again once a report reaches one
/// hundred percent.
pub struct InitialState {
    progress: u8,
    progress_visible: bool,
}

impl InitialState {
    pub fn new() -> Self {
        Self {
            progress: 0,
            progress_visible: false,
        }
    }

    fn record_progress(&mut self, values: &InputValues) {
        let Some(percent) = values.get_u64(PROGRESS_KEY) else {
            return;
        };
        if percent >= 100 {
            self.progress = 0;
            self.progress_visible = false;
        } else {
            self.progress = percent as u8;
            self.progress_visible = true;
        }
    }
}

impl Default for InitialState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for InitialState {
    fn name(&self) -> &str {
        "initial"
    }

    fn layout(&self) -> Layout {
        Layout::new("Initial State")
            .row(vec![Widget::text("Welcome to the complex state machine.")])
            .row(vec![
                Widget::button("Go to State A", GO_TO_STATE_A),
                Widget::button("Go to State B", GO_TO_STATE_B),
                Widget::button("Go to State C", GO_TO_STATE_C),
                Widget::button("Exit", EVENT_EXIT),
            ])
            .row(vec![Widget::text("Enter the file URL to download:")])
            .row(vec![
                Widget::input(FILE_URL_KEY),
                Widget::button("Download", DOWNLOAD),
            ])
            .row(vec![Widget::progress(
                "download_progress",
                self.progress,
                self.progress_visible,
            )])
    }

    fn transition(&mut self, event: &str, values: &InputValues) -> Transition {
        match event {
            GO_TO_STATE_A => Transition::Goto("state_a".to_string()),
            GO_TO_STATE_B => Transition::Goto("state_b".to_string()),
            GO_TO_STATE_C => Transition::OpenSecondary("state_c".to_string()),
            DOWNLOAD => match values.get_str(FILE_URL_KEY) {
                Some(url) if !url.is_empty() => Transition::Download {
                    url: url.to_string(),
                },
                _ => Transition::Stay,
            },
            EVENT_PROGRESS => {
                self.record_progress(values);
                Transition::Stay
            }
            _ => Transition::Stay,
        }
    }
}
