//! Node color palettes chosen from the journey context.

/// A four-step fill gradient plus the text/stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub gradient: [&'static str; 4],
}

pub const EMERALD: Palette = Palette {
    name: "emerald",
    primary: "#10b981",
    secondary: "#059669",
    accent: "#34d399",
    text: "#064e3b",
    gradient: ["#10b981", "#059669", "#047857", "#065f46"],
};

pub const BLUE: Palette = Palette {
    name: "blue",
    primary: "#3b82f6",
    secondary: "#2563eb",
    accent: "#60a5fa",
    text: "#1e3a8a",
    gradient: ["#3b82f6", "#2563eb", "#1d4ed8", "#1e40af"],
};

pub const VIOLET: Palette = Palette {
    name: "violet",
    primary: "#8b5cf6",
    secondary: "#7c3aed",
    accent: "#a78bfa",
    text: "#4c1d95",
    gradient: ["#8b5cf6", "#7c3aed", "#7c2d12", "#581c87"],
};

pub const INDIGO: Palette = Palette {
    name: "indigo",
    primary: "#6366f1",
    secondary: "#4f46e5",
    accent: "#818cf8",
    text: "#312e81",
    gradient: ["#6366f1", "#4f46e5", "#4338ca", "#3730a3"],
};

/// Cycling order.
pub const PALETTES: [&Palette; 4] = [&EMERALD, &BLUE, &VIOLET, &INDIGO];

const RETAIL_KEYWORDS: [&str; 4] = ["ecommerce", "e-commerce", "shop", "store"];
const SOFTWARE_KEYWORDS: [&str; 3] = ["saas", "software", "platform"];
const MOBILE_KEYWORDS: [&str; 2] = ["mobile", "app"];

impl Palette {
    /// Picks a palette by scanning `context` for domain keywords.
    pub fn for_context(context: &str) -> &'static Palette {
        let context = context.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| context.contains(k));

        if mentions(&RETAIL_KEYWORDS) {
            &EMERALD
        } else if mentions(&SOFTWARE_KEYWORDS) {
            &BLUE
        } else if mentions(&MOBILE_KEYWORDS) {
            &VIOLET
        } else {
            &INDIGO
        }
    }

    pub fn by_name(name: &str) -> Option<&'static Palette> {
        PALETTES
            .into_iter()
            .find(|palette| palette.name.eq_ignore_ascii_case(name))
    }

    /// The palette after this one in cycling order.
    pub fn next(&self) -> &'static Palette {
        let index = PALETTES
            .iter()
            .position(|palette| palette.primary == self.primary)
            .map_or(0, |i| (i + 1) % PALETTES.len());
        PALETTES[index]
    }

    /// Fill color for the node at `index`; clamps to the last gradient stop.
    pub fn fill(&self, index: usize) -> &'static str {
        self.gradient[index.min(self.gradient.len() - 1)]
    }
}
