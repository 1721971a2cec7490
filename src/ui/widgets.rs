use eframe::egui::{self, Response, RichText, Ui, Widget};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A plain text label with optional hover text.
pub struct Label<'a> {
    text: &'a str,
    hover: Option<&'a str>,
}

impl<'a> Label<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, hover: None }
    }

    pub fn hover(mut self, hover: &'a str) -> Self {
        self.hover = Some(hover);
        self
    }
}

impl Widget for Label<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.add(egui::Label::new(RichText::new(self.text).strong()).selectable(false));
        match self.hover {
            Some(hover) => response.on_hover_text(hover),
            None => response,
        }
    }
}

// ---------------------------------------------------------------------------
// ToggleButton
// ---------------------------------------------------------------------------

/// A named button that remembers whether it is on, drawn with a chevron.
///
/// Add it with `ui.add(&mut toggle)`; the toggle flips before the response
/// is returned, so `response.clicked()` is the hook for the click handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    name: String,
    on: bool,
}

impl ToggleButton {
    pub fn new(name: impl Into<String>, on: bool) -> Self {
        Self {
            name: name.into(),
            on,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flip the toggle and return the new value.
    pub fn click(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Button text: the name followed by an up chevron when on, down when off.
    pub fn caption(&self) -> String {
        let chevron = if self.on { "⏶" } else { "⏷" };
        format!("{}  {chevron}", self.name)
    }
}

impl Widget for &mut ToggleButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let button = egui::Button::new(RichText::new(self.caption()).color(ACCENT))
            .stroke(egui::Stroke::new(1.5, ACCENT))
            .selected(self.on);
        let response = ui.add(button);
        if response.clicked() {
            self.click();
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_on_click() {
        let mut toggle = ToggleButton::new("Search", false);
        assert!(!toggle.is_on());
        assert!(toggle.click());
        assert!(toggle.is_on());
        assert!(!toggle.click());
    }

    #[test]
    fn test_caption_chevron_follows_state() {
        let mut toggle = ToggleButton::new("Records", false);
        assert_eq!(toggle.caption(), "Records  ⏷");
        toggle.click();
        assert_eq!(toggle.caption(), "Records  ⏶");
    }
}
