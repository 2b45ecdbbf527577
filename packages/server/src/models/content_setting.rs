use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::content_setting;
use crate::error::AppError;

/// Whether a content key holds copy or an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
}

/// A known content key and the value shown when no override is stored.
pub struct ContentDefault {
    pub key: &'static str,
    pub kind: ContentKind,
    /// Default copy for text keys.
    pub text: Option<&'static str>,
    /// Site-relative fallback for image keys, if the page has one.
    pub image_url: Option<&'static str>,
}

const fn text(key: &'static str, value: &'static str) -> ContentDefault {
    ContentDefault {
        key,
        kind: ContentKind::Text,
        text: Some(value),
        image_url: None,
    }
}

const fn image(key: &'static str) -> ContentDefault {
    ContentDefault {
        key,
        kind: ContentKind::Image,
        text: None,
        image_url: None,
    }
}

const fn image_or(key: &'static str, url: &'static str) -> ContentDefault {
    ContentDefault {
        key,
        kind: ContentKind::Image,
        text: None,
        image_url: Some(url),
    }
}

/// Every key the public pages read.
pub static DEFAULTS: &[ContentDefault] = &[
    // Home
    text("home_hero_title", "Divine Ameh"),
    text(
        "home_hero_subtitle",
        "A visionary artist bridging ancient African wisdom with contemporary celestial beauty.",
    ),
    text("home_testimonials_heading", "What people say"),
    text("home_favorites_heading", "My favorite works"),
    text(
        "home_favorites_paragraph",
        "A curated collection of my most powerful pieces, showcasing the intersection of African \
         heritage and celestial beauty.",
    ),
    // About
    image_or("about_me_portrait_image", "/images/divine-ameh-portrait.png"),
    text("about_me_portrait_caption", "Artist Portrait"),
    text("about_me_journey_vision_heading", "Journey & Vision"),
    text(
        "about_me_journey_vision_paragraph",
        "My art is a dialogue between the ancestral and the ethereal, a celebration of African \
         heritage infused with the boundless wonder of the cosmos.",
    ),
    text("about_me_artist_statement_heading", "Artist Statement"),
    text(
        "about_me_artist_statement_paragraph1",
        "I believe in the power of visual storytelling to connect us to our roots and inspire us \
         to reach for new horizons. Each piece is an invitation to explore identity, spirituality, \
         and the infinite possibilities of Afrofuturism.",
    ),
    text(
        "about_me_artist_statement_paragraph2",
        "Through my work, I aim to honor the resilience and beauty of African cultures while \
         envisioning a future where our narratives are central to the universal tapestry.",
    ),
    text("about_me_artistic_journey_heading", "My Artistic Journey"),
    text(
        "about_me_artistic_journey_paragraph1",
        "My journey into art began with a deep fascination for the intricate patterns of \
         traditional African textiles and the vast, star-filled skies of my childhood.",
    ),
    text(
        "about_me_artistic_journey_paragraph2",
        "I formally trained in fine arts, but my true education came from immersing myself in \
         cultural studies and exploring digital and mixed media techniques.",
    ),
    text(
        "about_me_artistic_journey_paragraph3",
        "Over the years, I've had the privilege of exhibiting my work in galleries worldwide and \
         collaborating with diverse clients on projects that celebrate cultural identity.",
    ),
    text("about_me_philosophy_inspirations_heading", "Philosophy & Inspirations"),
    text(
        "about_me_philosophy_inspirations_intro_paragraph",
        "My artistic philosophy is centered on the concept of \"African Venusianism\": a fusion of \
         ancient African wisdom, matriarchal strength, and the celestial beauty of the cosmos. I \
         draw inspiration from:",
    ),
    text(
        "about_me_philosophy_inspirations_list_item1",
        "Traditional African Symbolism: the rich iconography, patterns, and narratives of African \
         cultures.",
    ),
    text(
        "about_me_philosophy_inspirations_list_item2",
        "Astronomy & Cosmology: the mysteries of the universe, stars, galaxies, and celestial \
         phenomena.",
    ),
    text(
        "about_me_philosophy_inspirations_list_item3",
        "Afrofuturism: the cultural aesthetic that combines science fiction, fantasy, and history \
         with Black culture.",
    ),
    text(
        "about_me_philosophy_inspirations_list_item4",
        "Spirituality & Metaphysics: concepts of energy, consciousness, and the interconnectedness \
         of all things.",
    ),
    text(
        "about_me_philosophy_inspirations_list_item5",
        "Nature: the organic forms, vibrant colors, and inherent balance found in the natural world.",
    ),
    text(
        "about_me_philosophy_inspirations_conclusion_paragraph",
        "I believe art should not only be visually appealing but also evoke emotion, spark \
         thought, and foster a deeper connection to oneself and the world.",
    ),
    text("about_me_cta_heading", "Let's Create Together"),
    text(
        "about_me_cta_paragraph",
        "If my vision resonates with yours, I'd love to discuss how we can create something truly \
         divine together.",
    ),
    // Services
    text("services_what_can_i_do_heading", "What can I do"),
    text(
        "services_what_can_i_do_paragraph",
        "Offering a spectrum of creative services that blend ancient African wisdom with \
         contemporary celestial aesthetics, creating powerful visual narratives rooted in our \
         heritage.",
    ),
    image("services_cultural_photography_image"),
    text("services_cultural_photography_heading", "Cultural Photography"),
    text(
        "services_cultural_photography_paragraph",
        "My cultural photography service is dedicated to preserving and celebrating the rich \
         tapestry of African heritage, from traditional ceremonies to intimate family gatherings.",
    ),
    text("services_cultural_photography_list_item1", "Documentary-style event coverage"),
    text("services_cultural_photography_list_item2", "Traditional portrait sessions"),
    text(
        "services_cultural_photography_list_item3",
        "Community and cultural festival photography",
    ),
    text("services_cultural_photography_list_item4", "High-resolution digital images"),
    text("services_cultural_photography_list_item5", "Optional print packages and albums"),
    image("services_afrofuturistic_art_image"),
    text("services_afrofuturistic_art_heading", "Afrofuturistic Art"),
    text(
        "services_afrofuturistic_art_paragraph",
        "Elevate your brand or personal space with stunning Afrofuturistic visuals that bridge \
         ancient African wisdom with future visions.",
    ),
    text("services_afrofuturistic_art_list_item1", "Digital illustrations and concept art"),
    text("services_afrofuturistic_art_list_item2", "Album art and book covers"),
    text("services_afrofuturistic_art_list_item3", "Brand identity and visual development"),
    text("services_afrofuturistic_art_list_item4", "Custom commissions for personal collections"),
    text(
        "services_afrofuturistic_art_list_item5",
        "High-resolution digital files for various uses",
    ),
    image("services_spiritual_design_image"),
    text("services_spiritual_design_heading", "Spiritual Design"),
    text(
        "services_spiritual_design_paragraph",
        "Transform your ideas into captivating visual stories that connect the earthly with the \
         divine through sacred geometry, celestial themes, and ancient symbols.",
    ),
    text("services_spiritual_design_list_item1", "Symbolic logo and brand mark creation"),
    text("services_spiritual_design_list_item2", "Sacred geometry patterns and illustrations"),
    text("services_spiritual_design_list_item3", "Meditation and spiritual guide visuals"),
    text("services_spiritual_design_list_item4", "Event and retreat branding"),
    text("services_spiritual_design_list_item5", "Visual storytelling for spiritual practices"),
    text("services_why_choose_me_heading", "Why Choose Me"),
    text(
        "services_why_choose_me_paragraph",
        "My work is more than just art; it's a journey into the soul of African heritage fused \
         with the boundless possibilities of the cosmos.",
    ),
    text("services_why_choose_me_card1_heading", "Cultural Depth"),
    text(
        "services_why_choose_me_card1_paragraph",
        "Every piece is grounded in research and lived understanding of African traditions.",
    ),
    text("services_why_choose_me_card2_heading", "Visionary Style"),
    text(
        "services_why_choose_me_card2_paragraph",
        "A distinctive celestial aesthetic that makes your project stand apart.",
    ),
    text("services_why_choose_me_card3_heading", "Dedicated Craft"),
    text(
        "services_why_choose_me_card3_paragraph",
        "A commitment to excellence from the first sketch to the final delivery.",
    ),
    text("services_cta_heading", "Ready to start your project?"),
    text(
        "services_cta_paragraph",
        "Whether you have a specific project in mind or just want to explore possibilities, I'd \
         love to hear from you. Let's connect and bring your vision to life.",
    ),
];

/// Look up a known key.
pub fn default_for(key: &str) -> Option<&'static ContentDefault> {
    DEFAULTS.iter().find(|d| d.key == key)
}

/// Keys are 1-128 characters of `[a-z0-9_]`.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty()
        || key.len() > 128
        || !key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
    {
        return Err(AppError::Validation(
            "Key must be 1-128 characters of lowercase letters, digits and underscores".into(),
        ));
    }
    Ok(())
}

/// A stored override.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentSettingResponse {
    #[schema(example = "about_me_portrait_image")]
    pub key: String,
    pub value_text: Option<String>,
    pub value_image_url: Option<String>,
    pub value_image_width: Option<i32>,
    pub value_image_height: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<content_setting::Model> for ContentSettingResponse {
    fn from(model: content_setting::Model) -> Self {
        Self {
            key: model.key,
            value_text: model.value_text,
            value_image_url: model.value_image_url,
            value_image_width: model.value_image_width,
            value_image_height: model.value_image_height,
            updated_at: model.updated_at,
        }
    }
}

/// All stored overrides by key.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentSettingsResponse {
    pub settings: BTreeMap<String, ContentSettingResponse>,
}

/// A content value as a page should render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ResolvedContent {
    pub kind: ContentKind,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    /// `true` when no override is stored and the default is used.
    pub is_default: bool,
}

impl ResolvedContent {
    fn from_default(default: &ContentDefault) -> Self {
        Self {
            kind: default.kind,
            text: default.text.map(str::to_string),
            image_url: default.image_url.map(str::to_string),
            image_width: None,
            image_height: None,
            is_default: true,
        }
    }

    fn from_stored(kind: ContentKind, stored: &content_setting::Model) -> Self {
        Self {
            kind,
            text: stored.value_text.clone(),
            image_url: stored.value_image_url.clone(),
            image_width: stored.value_image_width,
            image_height: stored.value_image_height,
            is_default: false,
        }
    }
}

fn has_value(kind: ContentKind, stored: &content_setting::Model) -> bool {
    match kind {
        ContentKind::Text => stored.value_text.is_some(),
        ContentKind::Image => stored.value_image_url.is_some(),
    }
}

/// Resolve every key starting with `prefix`: the stored override when it
/// holds a value, else the catalogue default. Stored keys outside the
/// catalogue are included as-is.
pub fn resolve(
    prefix: &str,
    stored: &HashMap<String, content_setting::Model>,
) -> BTreeMap<String, ResolvedContent> {
    let mut out = BTreeMap::new();

    for default in DEFAULTS.iter().filter(|d| d.key.starts_with(prefix)) {
        let value = match stored.get(default.key) {
            Some(row) if has_value(default.kind, row) => ResolvedContent::from_stored(default.kind, row),
            _ => ResolvedContent::from_default(default),
        };
        out.insert(default.key.to_string(), value);
    }

    for (key, row) in stored {
        if key.starts_with(prefix) && !out.contains_key(key) {
            let kind = if row.value_image_url.is_some() {
                ContentKind::Image
            } else {
                ContentKind::Text
            };
            out.insert(key.clone(), ResolvedContent::from_stored(kind, row));
        }
    }

    out
}
