use crate::view::View;
use minijinja::{Environment, context};
use pixabay::Hit;

const CARDS: &str = "cards.html";
const CARDS_TEMPLATE: &str = include_str!("../templates/cards.html");

/// Turns result pages into gallery cards. Values are html-escaped by the template engine.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CARDS, CARDS_TEMPLATE)?;
        Ok(Self { env })
    }

    #[cfg(test)]
    pub(crate) fn with_template(source: &'static str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CARDS, source)?;
        Ok(Self { env })
    }

    /// One card per hit, in order.
    pub fn cards(&self, hits: &[Hit]) -> Result<String, minijinja::Error> {
        self.env.get_template(CARDS)?.render(context! { hits })
    }

    /// Appends the cards of `hits` after the existing ones and lets the lightbox pick them up.
    pub fn append_page(&self, view: &mut impl View, hits: &[Hit]) -> Result<(), minijinja::Error> {
        view.append(self.cards(hits)?);
        view.refresh_lightbox();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn hit(id: u64, tags: &str) -> Hit {
    Hit {
        id,
        webformat_url: format!("https://cdn.example.com/{id}_640.jpg"),
        large_image_url: format!("https://cdn.example.com/{id}_1280.jpg"),
        tags: tags.to_owned(),
        likes: id * 10,
        views: id * 100,
        comments: id,
        downloads: id * 1000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::Document;
    use crate::view::{Patch, Patches};

    #[test]
    fn card_markup() {
        let r = Renderer::new().unwrap();
        let html = r.cards(&[hit(7, "sunset")]).unwrap();
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("class=\"photo-card\""));
        assert!(html.contains("alt=\"sunset\""));
        assert!(html.contains("loading=\"lazy\""));
        assert!(html.contains("7_1280.jpg\""));
        assert!(html.contains("7_640.jpg\""));
        assert!(html.contains("<b>Likes</b><span class=\"likes\">70</span>"));
        assert!(html.contains("<b>Views</b><span class=\"views\">700</span>"));
        assert!(html.contains("<b>Comments</b><span class=\"comments\">7</span>"));
        assert!(html.contains("<b>Downloads</b><span class=\"downloads\">7000</span>"));
        // the link wraps the card
        assert!(html.find("<a ").unwrap() < html.find("photo-card").unwrap());
    }

    #[test]
    fn escapes_values() {
        let r = Renderer::new().unwrap();
        let html = r.cards(&[hit(1, "\"><script>alert(1)</script>")]).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_page() {
        let r = Renderer::new().unwrap();
        assert!(!r.cards(&[]).unwrap().contains("photo-card"));
    }

    #[test]
    fn append_is_append_only() {
        let r = Renderer::new().unwrap();
        let mut p = Patches::default();
        r.append_page(&mut p, &[hit(1, "alpha"), hit(2, "beta")]).unwrap();
        r.append_page(&mut p, &[hit(3, "gamma")]).unwrap();
        assert!(!p.iter().any(|p| *p == Patch::Clear));

        let mut doc = Document::default();
        doc.apply(&p);
        assert_eq!(doc.cards(), 3);
        assert_eq!(doc.refreshes, 2);
        let a = doc.html.find("alt=\"alpha\"").unwrap();
        let b = doc.html.find("alt=\"beta\"").unwrap();
        let c = doc.html.find("alt=\"gamma\"").unwrap();
        assert!(a < b && b < c);
    }
}
