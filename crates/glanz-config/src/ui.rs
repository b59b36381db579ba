use serde::{Deserialize, Serialize};

fn default_image_url_template() -> String {
    "https://picsum.photos/seed/{keyword}/400/300".to_string()
}

fn default_show_images() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// `{keyword}` is replaced by the option's image keyword
    #[serde(default = "default_image_url_template")]
    pub image_url_template: String,
    #[serde(default = "default_show_images")]
    pub show_images: bool,
}

impl UiConfig {
    pub fn image_url(&self, keyword: &str) -> String {
        let keyword: String = keyword
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        self.image_url_template.replace("{keyword}", &keyword)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            image_url_template: default_image_url_template(),
            show_images: default_show_images(),
        }
    }
}
