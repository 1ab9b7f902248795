use serde::{Deserialize, Serialize};

/// One of the three glyphs the front-end knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Sun,
    #[default]
    Cloud,
    Moon,
}

const SUN_KEYWORDS: &[&str] = &["sun", "clear"];
const CLOUD_KEYWORDS: &[&str] = &["cloud", "overcast", "rain", "patchy"];
const MOON_KEYWORDS: &[&str] = &["moon", "night"];

impl Glyph {
    /// Classify a condition keyword by case-insensitive substring match.
    ///
    /// Categories are tried in a fixed order (sun, cloud, moon) so overlapping
    /// text such as "Clear night" always lands on [`Glyph::Sun`]. Anything
    /// unrecognised falls back to [`Glyph::Cloud`].
    pub fn classify(keyword: &str) -> Self {
        let keyword = keyword.to_lowercase();
        let matches = |words: &[&str]| words.iter().any(|w| keyword.contains(w));

        if matches(SUN_KEYWORDS) {
            Self::Sun
        } else if matches(CLOUD_KEYWORDS) {
            Self::Cloud
        } else if matches(MOON_KEYWORDS) {
            Self::Moon
        } else {
            Self::Cloud
        }
    }

    /// Vector path in a 64x64 viewbox.
    pub fn path_data(self) -> &'static str {
        match self {
            Self::Sun => "M32,12 A20,20 0 1,1 31.99,12 Z",
            Self::Cloud => "M20,30 a10,10 0 0,1 10,-10 h6 a8,8 0 0,1 0,16 H20 z",
            Self::Moon => "M28,14 a12,12 0 1,0 0.1,0 Z",
        }
    }

    /// Fill colour as an SVG/CSS named colour.
    pub fn fill(self) -> &'static str {
        match self {
            Self::Sun => "gold",
            Self::Cloud => "lightgray",
            Self::Moon => "lightgoldenrodyellow",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Sun => '☀',
            Self::Cloud => '☁',
            Self::Moon => '☾',
        }
    }

    /// Standalone SVG document for the glyph.
    pub fn to_svg(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><path d="{}" fill="{}"/></svg>"#,
            self.path_data(),
            self.fill()
        )
    }
}
