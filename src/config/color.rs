use crate::foundation::core::Rgba8;

/// Normalized color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColorDef {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl ColorDef {
    pub(crate) fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
            a: to_u8(self.a),
        }
    }
}

/// Parse a CSS-style color string.
///
/// Accepts `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, and `rgba(r, g, b, a)`
/// with byte channels and a `[0, 1]` alpha.
pub(crate) fn parse_css_color(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("rgba") || lower.starts_with("rgb") {
        return parse_rgb_func(&lower);
    }
    Err(format!("unrecognized color \"{s}\""))
}

/// Parse a color, degrading any unrecognized input to opaque black.
pub(crate) fn parse_or_black(s: &str) -> Rgba8 {
    match parse_css_color(s) {
        Ok(c) => c.to_rgba8(),
        Err(e) => {
            tracing::debug!(color = s, error = %e, "color parse failed; using opaque black");
            Rgba8::opaque_black()
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(ColorDef::rgba(
        (r as f64) / 255.0,
        (g as f64) / 255.0,
        (b as f64) / 255.0,
        (a as f64) / 255.0,
    ))
}

fn parse_rgb_func(s: &str) -> Result<ColorDef, String> {
    let open = s.find('(').ok_or("missing '(' in rgb()/rgba()")?;
    let close = s.rfind(')').ok_or("missing ')' in rgb()/rgba()")?;
    if close <= open {
        return Err("malformed rgb()/rgba()".to_owned());
    }

    let parts: Vec<&str> = s[open + 1..close].split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb()/rgba() expects 3 or 4 components".to_owned());
    }

    fn byte_channel(p: &str) -> Result<f64, String> {
        let v: f64 = p.parse().map_err(|_| format!("invalid channel \"{p}\""))?;
        Ok(v.clamp(0.0, 255.0) / 255.0)
    }

    let r = byte_channel(parts[0])?;
    let g = byte_channel(parts[1])?;
    let b = byte_channel(parts[2])?;
    let a = if parts.len() == 4 {
        let v: f64 = parts[3]
            .parse()
            .map_err(|_| format!("invalid alpha \"{}\"", parts[3]))?;
        v.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Ok(ColorDef::rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/config/color.rs"]
mod tests;
