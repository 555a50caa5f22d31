use crate::{ArtifactUrl, Notification};

const INPUT_KEY: &str = "INPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    pub label: String,
    pub url: String,
}

/// Labels each artifact, keeping the order the backend listed them in.
pub fn result_links(urls: &[ArtifactUrl]) -> Vec<ResultLink> {
    urls.iter()
        .map(|artifact| {
            let key = artifact.name.to_uppercase();
            let label = if key == INPUT_KEY {
                format!("{INPUT_KEY} file")
            } else {
                format!("{key} output")
            };
            ResultLink {
                label,
                url: artifact.url.clone(),
            }
        })
        .collect()
}

/// What the presentation layer shows: one overwritten status line and a link list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub status_text: String,
    pub links: Vec<ResultLink>,
}

impl StatusView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a notification. Returns `true` when anything visible changed.
    pub fn apply(&mut self, notification: &Notification) -> bool {
        let text = notification.status_text();
        let mut changed = text != self.status_text;
        self.status_text = text;

        match notification {
            Notification::Stage(_) => {
                changed |= !self.links.is_empty();
                self.links.clear();
            }
            Notification::Completed { links } => {
                changed |= *links != self.links;
                self.links = links.clone();
            }
            Notification::Waiting(_) | Notification::Failed { .. } | Notification::TimedOut { .. } => {}
        }

        changed
    }
}
