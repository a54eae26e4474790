use crate::error::EvalResult;
use crate::number::format_number;
use crate::operation::Operator;

/// Keywords that are shorter than their `#rrggbb` form. A computed color
/// matching one of these renders as the keyword.
const SHORT_KEYWORDS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("white", [0xff, 0xff, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("blue", [0x00, 0x00, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("azure", [0xf0, 0xff, 0xff]),
    ("beige", [0xf5, 0xf5, 0xdc]),
    ("bisque", [0xff, 0xe4, 0xc4]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("indigo", [0x4b, 0x00, 0x82]),
    ("ivory", [0xff, 0xff, 0xf0]),
    ("khaki", [0xf0, 0xe6, 0x8c]),
    ("linen", [0xfa, 0xf0, 0xe6]),
    ("orchid", [0xda, 0x70, 0xd6]),
    ("peru", [0xcd, 0x85, 0x3f]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("plum", [0xdd, 0xa0, 0xdd]),
    ("salmon", [0xfa, 0x80, 0x72]),
    ("sienna", [0xa0, 0x52, 0x2d]),
    ("snow", [0xff, 0xfa, 0xfa]),
    ("tan", [0xd2, 0xb4, 0x8c]),
    ("tomato", [0xff, 0x63, 0x47]),
    ("violet", [0xee, 0x82, 0xee]),
    ("wheat", [0xf5, 0xde, 0xb3]),
];

/// RGBA color. Channels are kept in 0..=255 and alpha in 0..=1; every
/// constructor clamps.
#[derive(Debug, Clone)]
pub struct Color {
    pub rgb: [f64; 3],
    pub alpha: f64,
    /// Literal text from the stylesheet (`#123`), dropped once the color is
    /// modified.
    source: Option<String>,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.alpha == other.alpha
    }
}

impl Color {
    pub fn new(rgb: [f64; 3], alpha: f64) -> Self {
        Self {
            rgb: rgb.map(|channel| channel.clamp(0.0, 255.0)),
            alpha: alpha.clamp(0.0, 1.0),
            source: None,
        }
    }

    /// Grey with every channel set to `value`; used when a number meets a
    /// color in an operation.
    pub fn grey(value: f64) -> Self {
        Self::new([value; 3], 1.0)
    }

    /// Parses `#rgb` or `#rrggbb`, keeping the original text for output.
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let mut rgb = [0.0; 3];
        for (index, channel) in rgb.iter_mut().enumerate() {
            let pair = expanded.get(index * 2..index * 2 + 2)?;
            *channel = f64::from(u8::from_str_radix(pair, 16).ok()?);
        }
        Some(Self {
            source: Some(text.to_string()),
            ..Self::new(rgb, 1.0)
        })
    }

    pub fn from_keyword(name: &str) -> Option<Self> {
        SHORT_KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
            .map(|(_, rgb)| Self {
                source: Some(name.to_string()),
                ..Self::new(rgb.map(f64::from), 1.0)
            })
    }

    /// `hue` in degrees, `saturation`/`lightness`/`alpha` in 0..=1.
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 360.0;
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        let m2 = if lightness <= 0.5 {
            lightness * (saturation + 1.0)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = lightness * 2.0 - m2;

        let channel = |h: f64| {
            let h = if h < 0.0 {
                h + 1.0
            } else if h > 1.0 {
                h - 1.0
            } else {
                h
            };
            let value = if h * 6.0 < 1.0 {
                m1 + (m2 - m1) * h * 6.0
            } else if h * 2.0 < 1.0 {
                m2
            } else if h * 3.0 < 2.0 {
                m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
            } else {
                m1
            };
            value * 255.0
        };

        Self::new(
            [channel(hue + 1.0 / 3.0), channel(hue), channel(hue - 1.0 / 3.0)],
            alpha,
        )
    }

    /// Returns `(hue in degrees, saturation, lightness)`.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.rgb.map(|channel| channel / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (hue * 60.0, saturation, lightness)
    }

    /// Channel-wise arithmetic, clamped, keeping this color's alpha.
    pub fn operate(&self, op: Operator, other: &Color) -> EvalResult<Color> {
        let mut rgb = [0.0; 3];
        for (index, channel) in rgb.iter_mut().enumerate() {
            *channel = op.apply(self.rgb[index], other.rgb[index])?;
        }
        Ok(Color::new(rgb, self.alpha))
    }

    pub fn with_channel(&self, index: usize, value: f64) -> Color {
        let mut rgb = self.rgb;
        rgb[index] = value;
        Color::new(rgb, self.alpha)
    }

    pub fn with_alpha(&self, alpha: f64) -> Color {
        Color::new(self.rgb, alpha)
    }

    pub fn keyword(&self) -> Option<&'static str> {
        if self.alpha < 1.0 {
            return None;
        }
        let rgb = self.rounded();
        SHORT_KEYWORDS
            .iter()
            .find(|(_, channels)| *channels == rgb)
            .map(|(keyword, _)| *keyword)
    }

    pub fn to_css(&self) -> String {
        if let Some(source) = &self.source {
            return source.clone();
        }

        let [r, g, b] = self.rounded();
        if self.alpha < 1.0 {
            return format!("rgba({}, {}, {}, {})", r, g, b, format_number(self.alpha));
        }

        self.keyword()
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    fn rounded(&self) -> [u8; 3] {
        self.rgb.map(|channel| channel.round().clamp(0.0, 255.0) as u8)
    }
}
