//! Configuration for the page runtime
//!
//! Every difference between the page variants (thresholds, class names, copy
//! text, timings) lives in [`RuntimeConfig`]. Named presets are available through
//! [`Variant`], and a full config can be loaded from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the variant preset
pub const VARIANT_ENV_VAR: &str = "PAGEWRIGHT_VARIANT";

/// Named configuration presets, one per page generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Original page with inline-styled chrome and staggered card reveals
    Classic,
    /// First AOS-based page with hide-on-scroll navbar
    Legacy,
    /// Consultation-form page
    #[default]
    Redesign,
    /// Consultation page driven by AOS-style reveal markers
    Consultation,
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "legacy" => Ok(Self::Legacy),
            "redesign" => Ok(Self::Redesign),
            "consultation" => Ok(Self::Consultation),
            other => Err(anyhow::anyhow!("Unknown page variant '{}'", other)),
        }
    }
}

/// Scroll publisher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub throttle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { throttle_ms: 100 }
    }
}

/// Back-to-top control shown once the page is scrolled far enough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub class: String,
    pub visible_class: String,
    pub threshold: u32,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            class: "scroll-to-top".to_string(),
            visible_class: "visible".to_string(),
            threshold: 500,
        }
    }
}

/// Keyboard skip link inserted at the top of the body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipLinkConfig {
    /// Anchor the link jumps to
    pub target: String,
    pub text: String,
    pub class: String,
    /// `top` offset while the link is not focused
    pub hidden_top: String,
}

impl Default for SkipLinkConfig {
    fn default() -> Self {
        Self {
            target: "#projects".to_string(),
            text: "Skip to main content".to_string(),
            class: "skip-link".to_string(),
            hidden_top: "-100px".to_string(),
        }
    }
}

/// Navigation bar, mobile menu and active-link settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub navbar_id: String,
    /// Fallback lookup when no element carries `navbar_id`
    pub navbar_class: String,
    pub hamburger_class: String,
    pub menu_class: String,
    pub link_class: String,
    pub active_class: String,
    pub scrolled_class: String,
    /// Body class while the mobile menu is open
    pub menu_open_class: String,
    pub scrolled_threshold: u32,
    /// Added to the scroll position before matching sections
    pub active_offset: u32,
    /// Height of the fixed navbar subtracted from anchor targets
    pub header_clearance: u32,
    /// Hide the bar when scrolling down past this position
    pub hide_threshold: Option<u32>,
    pub back_to_top: Option<BackToTopConfig>,
    pub skip_link: Option<SkipLinkConfig>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            navbar_id: "navbar".to_string(),
            navbar_class: "navbar".to_string(),
            hamburger_class: "hamburger".to_string(),
            menu_class: "nav-menu".to_string(),
            link_class: "nav-link".to_string(),
            active_class: "active".to_string(),
            scrolled_class: "scrolled".to_string(),
            menu_open_class: "menu-open".to_string(),
            scrolled_threshold: 100,
            active_offset: 150,
            header_clearance: 100,
            hide_threshold: Some(200),
            back_to_top: Some(BackToTopConfig::default()),
            skip_link: Some(SkipLinkConfig::default()),
        }
    }
}

/// Viewport reveal, lazy media and background video settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Any element carrying this attribute is a reveal target
    pub attribute: String,
    /// Additional classes marking reveal targets
    pub target_classes: Vec<String>,
    pub pending_class: String,
    pub visible_class: String,
    /// Fraction of the element that must be inside the viewport
    pub threshold: f32,
    /// The viewport's trailing edge is pulled up by this many units
    pub bottom_margin: u32,
    /// Delay between revealing consecutive siblings
    pub stagger_ms: u64,
    pub lazy_attribute: String,
    pub lazy_class: String,
    pub video_class: String,
    pub video_threshold: f32,
    pub fallback_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            attribute: "data-reveal".to_string(),
            target_classes: Vec::new(),
            pending_class: "fade-in".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.1,
            bottom_margin: 50,
            stagger_ms: 0,
            lazy_attribute: "data-src".to_string(),
            lazy_class: "lazy".to_string(),
            video_class: "hero-video".to_string(),
            video_threshold: 0.5,
            fallback_class: "hero-image-fallback".to_string(),
        }
    }
}

/// Scroll-linked parallax layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub class: String,
    pub speed_attribute: String,
    pub default_speed: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            class: "parallax".to_string(),
            speed_attribute: "data-speed".to_string(),
            default_speed: 0.5,
        }
    }
}

/// Staggered load-in of the hero content children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub container_class: String,
    pub pending_class: String,
    pub visible_class: String,
    pub base_ms: u64,
    pub step_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            container_class: "hero-content".to_string(),
            pending_class: "loading".to_string(),
            visible_class: "loaded".to_string(),
            base_ms: 200,
            step_ms: 200,
        }
    }
}

/// Project detail overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub overlay_id: String,
    pub close_class: String,
    /// Attribute on trigger elements naming the record to open
    pub trigger_attribute: String,
    /// Attribute on overlay descendants naming the record field they display
    pub field_attribute: String,
    pub open_class: String,
    pub fade_ms: u64,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            overlay_id: "projectModal".to_string(),
            close_class: "close".to_string(),
            trigger_attribute: "data-project".to_string(),
            field_attribute: "data-modal-field".to_string(),
            open_class: "open".to_string(),
            fade_ms: 300,
        }
    }
}

/// Contact/consultation form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_class: String,
    pub submit_class: String,
    pub error_class: String,
    pub floated_class: String,
    pub focused_class: String,
    pub sending_label: String,
    pub validation_message: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_class: "consultation-form".to_string(),
            submit_class: "btn-submit".to_string(),
            error_class: "field-error".to_string(),
            floated_class: "floated".to_string(),
            focused_class: "focused".to_string(),
            sending_label: "Sending Request...".to_string(),
            validation_message: "Please fill in all required fields.".to_string(),
            success_message: "Thank you! Your consultation request has been received. \
                              We'll contact you within 24 hours."
                .to_string(),
            failure_message: "There was an error sending your request. \
                              Please try again or call us directly."
                .to_string(),
        }
    }
}

/// Transient notification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub class: String,
    pub close_class: String,
    pub leaving_class: String,
    pub display_ms: u64,
    pub exit_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            class: "notification".to_string(),
            close_class: "notification-close".to_string(),
            leaving_class: "leaving".to_string(),
            display_ms: 6000,
            exit_ms: 300,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub scroll: ScrollConfig,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub intro: IntroConfig,
    pub modal: ModalConfig,
    pub form: FormConfig,
    pub notice: NoticeConfig,
}

impl RuntimeConfig {
    /// Preset for one of the known page variants
    pub fn for_variant(variant: Variant) -> Self {
        let mut config = Self::default();
        match variant {
            Variant::Redesign => {}
            Variant::Consultation => {
                config.reveal.attribute = "data-aos".to_string();
                config.reveal.visible_class = "aos-animate".to_string();
                config.navigation.back_to_top = Some(BackToTopConfig {
                    threshold: 300,
                    ..BackToTopConfig::default()
                });
                config.navigation.skip_link = None;
            }
            Variant::Legacy => {
                let nav = &mut config.navigation;
                nav.scrolled_threshold = 50;
                nav.hide_threshold = Some(100);
                nav.active_offset = 100;
                nav.header_clearance = 80;
                nav.back_to_top = Some(BackToTopConfig {
                    threshold: 300,
                    ..BackToTopConfig::default()
                });
                nav.skip_link = None;

                config.reveal.target_classes = ["value-card", "service-card", "team-card", "project-card"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                config.reveal.visible_class = "animate-in".to_string();

                config.form.form_class = "contact-form".to_string();
                config.form.sending_label = "Sending...".to_string();
                config.form.success_message =
                    "Thank you! Your message has been sent successfully.".to_string();
                config.notice.display_ms = 5000;
            }
            Variant::Classic => {
                let nav = &mut config.navigation;
                nav.scrolled_threshold = 100;
                nav.hide_threshold = None;
                nav.active_offset = 100;
                nav.header_clearance = 80;
                nav.back_to_top = None;
                nav.skip_link = None;

                config.reveal.target_classes = [
                    "project-card",
                    "value-card",
                    "glass-card",
                    "team-card",
                    "section-header",
                    "vision-section",
                    "mission-section",
                    "contact-item",
                ]
                .iter()
                .map(|c| c.to_string())
                .collect();
                config.reveal.stagger_ms = 100;

                config.parallax.class = "hero-image".to_string();

                config.form.form_class = "contact-form".to_string();
                config.form.submit_class = "submit-button".to_string();
                config.form.sending_label = "Sending...".to_string();
                config.form.success_message = "Message Sent!".to_string();
            }
        }
        config
    }

    /// Parse a complete or partial config; missing fields take the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse runtime configuration")
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Preset chosen by the environment, falling back to the default variant
    pub fn from_env() -> Self {
        Self::for_variant(variant_from_env())
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.scroll.throttle_ms)
    }
}

/// Variant named by [`VARIANT_ENV_VAR`], or the default when unset or unknown
pub fn variant_from_env() -> Variant {
    let Some(value) = std::env::var_os(VARIANT_ENV_VAR).and_then(|val| val.into_string().ok())
    else {
        return Variant::default();
    };
    value.parse().unwrap_or_else(|e| {
        tracing::warn!("{}; using default variant", e);
        Variant::default()
    })
}
