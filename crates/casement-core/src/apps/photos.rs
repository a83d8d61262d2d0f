use crate::config::Profile;
use crate::content::{Content, ContentError, RenderContext};

/// Profile card shown by the photo viewer window.
#[derive(Debug, Clone)]
pub struct PhotoViewer {
    profile: Profile,
}

impl PhotoViewer {
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }
}

impl Content for PhotoViewer {
    fn render(&mut self, _ctx: &RenderContext) -> Result<Vec<String>, ContentError> {
        Ok(vec![
            "[ profile-pic.png ]".to_string(),
            String::new(),
            self.profile.name.clone(),
            self.profile.title.clone(),
            self.profile.location.clone(),
        ])
    }
}
