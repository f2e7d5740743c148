use serde::Serialize;

/// The browser surface a search session drives: the gallery container, the
/// "load more" button, the lightbox and the toasts.
pub trait View {
    fn clear(&mut self);
    fn append(&mut self, html: String);
    fn refresh_lightbox(&mut self);
    fn set_load_more(&mut self, visible: bool);
    fn info(&mut self, message: &str);
    fn failure(&mut self, message: &str);
    /// Scrolls down by the height of `cards` gallery cards.
    fn scroll(&mut self, cards: u32);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    Clear,
    Append { html: String },
    RefreshLightbox,
    LoadMore { visible: bool },
    Info { message: String },
    Failure { message: String },
    Scroll { cards: u32 },
}

/// Records view updates so that the page script can replay them in order.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Patches(Vec<Patch>);

#[cfg(test)]
impl Patches {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.0.iter()
    }
}

impl View for Patches {
    fn clear(&mut self) {
        self.0.push(Patch::Clear);
    }

    fn append(&mut self, html: String) {
        self.0.push(Patch::Append { html });
    }

    fn refresh_lightbox(&mut self) {
        self.0.push(Patch::RefreshLightbox);
    }

    fn set_load_more(&mut self, visible: bool) {
        self.0.push(Patch::LoadMore { visible });
    }

    fn info(&mut self, message: &str) {
        self.0.push(Patch::Info {
            message: message.to_owned(),
        });
    }

    fn failure(&mut self, message: &str) {
        self.0.push(Patch::Failure {
            message: message.to_owned(),
        });
    }

    fn scroll(&mut self, cards: u32) {
        self.0.push(Patch::Scroll { cards });
    }
}
