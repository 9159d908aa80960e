//! Scale tables the utility catalog is generated from.
//!
//! Each table maps a class-name suffix to the value substituted into a
//! declaration template.

pub type Scale = &'static [(&'static str, &'static str)];

pub const SPACING: Scale = &[
    ("0", "0px"),
    ("px", "1px"),
    ("0.5", "0.125rem"),
    ("1", "0.25rem"),
    ("1.5", "0.375rem"),
    ("2", "0.5rem"),
    ("2.5", "0.625rem"),
    ("3", "0.75rem"),
    ("3.5", "0.875rem"),
    ("4", "1rem"),
    ("5", "1.25rem"),
    ("6", "1.5rem"),
    ("7", "1.75rem"),
    ("8", "2rem"),
    ("9", "2.25rem"),
    ("10", "2.5rem"),
    ("11", "2.75rem"),
    ("12", "3rem"),
    ("14", "3.5rem"),
    ("16", "4rem"),
    ("20", "5rem"),
    ("24", "6rem"),
    ("28", "7rem"),
    ("32", "8rem"),
    ("36", "9rem"),
    ("40", "10rem"),
    ("44", "11rem"),
    ("48", "12rem"),
    ("52", "13rem"),
    ("56", "14rem"),
    ("60", "15rem"),
    ("64", "16rem"),
    ("72", "18rem"),
    ("80", "20rem"),
    ("96", "24rem"),
];

pub const FRACTIONS: Scale = &[
    ("1/2", "50%"),
    ("1/3", "33.333333%"),
    ("2/3", "66.666667%"),
    ("1/4", "25%"),
    ("2/4", "50%"),
    ("3/4", "75%"),
    ("full", "100%"),
];

pub const BOX_SIZES: Scale = &[
    ("auto", "auto"),
    ("1/5", "20%"),
    ("2/5", "40%"),
    ("3/5", "60%"),
    ("4/5", "80%"),
    ("1/6", "16.666667%"),
    ("2/6", "33.333333%"),
    ("3/6", "50%"),
    ("4/6", "66.666667%"),
    ("5/6", "83.333333%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
];

pub const WIDTHS: Scale = &[
    ("1/12", "8.333333%"),
    ("2/12", "16.666667%"),
    ("3/12", "25%"),
    ("4/12", "33.333333%"),
    ("5/12", "41.666667%"),
    ("6/12", "50%"),
    ("7/12", "58.333333%"),
    ("8/12", "66.666667%"),
    ("9/12", "75%"),
    ("10/12", "83.333333%"),
    ("11/12", "91.666667%"),
    ("screen", "100vw"),
];

pub const CONTENT_SIZES: Scale = &[
    ("full", "100%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
];

pub const MAX_WIDTHS: Scale = &[
    ("0", "0rem"),
    ("none", "none"),
    ("xs", "20rem"),
    ("sm", "24rem"),
    ("md", "28rem"),
    ("lg", "32rem"),
    ("xl", "36rem"),
    ("2xl", "42rem"),
    ("3xl", "48rem"),
    ("4xl", "56rem"),
    ("5xl", "64rem"),
    ("6xl", "72rem"),
    ("7xl", "80rem"),
    ("full", "100%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
    ("prose", "65ch"),
    ("screen-sm", "640px"),
    ("screen-md", "768px"),
    ("screen-lg", "1024px"),
    ("screen-xl", "1280px"),
    ("screen-2xl", "1536px"),
];

pub const SCREEN_HEIGHT: Scale = &[("screen", "100vh"), ("none", "none")];

/// Name, font size, line height.
pub const FONT_SIZES: &[(&str, &str, &str)] = &[
    ("xs", "0.75rem", "1rem"),
    ("sm", "0.875rem", "1.25rem"),
    ("base", "1rem", "1.5rem"),
    ("lg", "1.125rem", "1.75rem"),
    ("xl", "1.25rem", "1.75rem"),
    ("2xl", "1.5rem", "2rem"),
    ("3xl", "1.875rem", "2.25rem"),
    ("4xl", "2.25rem", "2.5rem"),
    ("5xl", "3rem", "1"),
    ("6xl", "3.75rem", "1"),
    ("7xl", "4.5rem", "1"),
    ("8xl", "6rem", "1"),
    ("9xl", "8rem", "1"),
];

pub const LEADING: Scale = &[
    ("3", ".75rem"),
    ("4", "1rem"),
    ("5", "1.25rem"),
    ("6", "1.5rem"),
    ("7", "1.75rem"),
    ("8", "2rem"),
    ("9", "2.25rem"),
    ("10", "2.5rem"),
    ("none", "1"),
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
];

pub const TRACKING: Scale = &[
    ("tighter", "-0.05em"),
    ("tight", "-0.025em"),
    ("normal", "0em"),
    ("wide", "0.025em"),
    ("wider", "0.05em"),
    ("widest", "0.1em"),
];

pub const FONT_WEIGHTS: Scale = &[
    ("thin", "100"),
    ("extralight", "200"),
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
];

pub const TEXT_ALIGN: Scale = &[
    ("left", "left"),
    ("center", "center"),
    ("right", "right"),
    ("justify", "justify"),
    ("start", "start"),
    ("end", "end"),
];

pub const RADII: Scale = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("", "0.25rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("2xl", "1rem"),
    ("3xl", "1.5rem"),
    ("full", "9999px"),
];

pub const BORDER_WIDTHS: Scale = &[("0", "0px"), ("2", "2px"), ("4", "4px"), ("8", "8px"), ("", "1px")];

pub const BORDER_STYLES: Scale = &[
    ("solid", "solid"),
    ("dashed", "dashed"),
    ("dotted", "dotted"),
    ("double", "double"),
    ("hidden", "hidden"),
    ("none", "none"),
];

pub const OUTLINE_WIDTHS: Scale = &[("0", "0px"), ("1", "1px"), ("2", "2px"), ("4", "4px"), ("8", "8px")];

pub const OUTLINE_STYLES: Scale = &[
    ("", "solid"),
    ("dashed", "dashed"),
    ("dotted", "dotted"),
    ("double", "double"),
];

pub const OVERFLOW: Scale = &[
    ("auto", "auto"),
    ("hidden", "hidden"),
    ("clip", "clip"),
    ("visible", "visible"),
    ("scroll", "scroll"),
];

pub const OBJECT_FIT: Scale = &[
    ("contain", "contain"),
    ("cover", "cover"),
    ("fill", "fill"),
    ("none", "none"),
    ("scale-down", "scale-down"),
];

pub const OBJECT_POSITION: Scale = &[
    ("bottom", "bottom"),
    ("center", "center"),
    ("left", "left"),
    ("left-bottom", "left bottom"),
    ("left-top", "left top"),
    ("right", "right"),
    ("right-bottom", "right bottom"),
    ("right-top", "right top"),
    ("top", "top"),
];

pub const OPACITY: Scale = &[
    ("0", "0"),
    ("5", "0.05"),
    ("10", "0.1"),
    ("20", "0.2"),
    ("25", "0.25"),
    ("30", "0.3"),
    ("40", "0.4"),
    ("50", "0.5"),
    ("60", "0.6"),
    ("70", "0.7"),
    ("75", "0.75"),
    ("80", "0.8"),
    ("90", "0.9"),
    ("95", "0.95"),
    ("100", "1"),
];

pub const JUSTIFY_CONTENT: Scale = &[
    ("normal", "normal"),
    ("start", "flex-start"),
    ("end", "flex-end"),
    ("center", "center"),
    ("between", "space-between"),
    ("around", "space-around"),
    ("evenly", "space-evenly"),
    ("stretch", "stretch"),
];

pub const JUSTIFY_ITEMS: Scale = &[
    ("start", "start"),
    ("end", "end"),
    ("center", "center"),
    ("stretch", "stretch"),
];

pub const SELF_ALIGNMENT: Scale = &[
    ("auto", "auto"),
    ("start", "start"),
    ("end", "end"),
    ("center", "center"),
    ("stretch", "stretch"),
    ("baseline", "baseline"),
];

pub const ALIGN_CONTENT: Scale = &[
    ("normal", "normal"),
    ("center", "center"),
    ("start", "flex-start"),
    ("end", "flex-end"),
    ("between", "space-between"),
    ("around", "space-around"),
    ("evenly", "space-evenly"),
    ("baseline", "baseline"),
    ("stretch", "stretch"),
];

pub const ALIGN_ITEMS: Scale = &[
    ("start", "start"),
    ("end", "end"),
    ("center", "center"),
    ("baseline", "baseline"),
    ("stretch", "stretch"),
];

pub const Z_INDEX: Scale = &[
    ("0", "0"),
    ("10", "10"),
    ("20", "20"),
    ("30", "30"),
    ("40", "40"),
    ("50", "50"),
    ("auto", "auto"),
];

pub const SHADOWS: Scale = &[
    ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    ("", "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)"),
    ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
    ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
    ("xl", "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)"),
    ("2xl", "0 25px 50px -12px rgb(0 0 0 / 0.25)"),
    ("inner", "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)"),
    ("none", "0 0 #0000"),
];

pub const EASING: Scale = &[
    ("linear", "linear"),
    ("in", "cubic-bezier(0.4, 0, 1, 1)"),
    ("out", "cubic-bezier(0, 0, 0.2, 1)"),
    ("in-out", "cubic-bezier(0.4, 0, 0.2, 1)"),
];

pub const DURATIONS: Scale = &[
    ("0", "0s"),
    ("75", "75ms"),
    ("100", "100ms"),
    ("150", "150ms"),
    ("200", "200ms"),
    ("300", "300ms"),
    ("500", "500ms"),
    ("700", "700ms"),
    ("1000", "1000ms"),
];

pub const SCALES: Scale = &[
    ("0", "0"),
    ("50", ".5"),
    ("75", ".75"),
    ("90", ".9"),
    ("95", ".95"),
    ("100", "1"),
    ("105", "1.05"),
    ("110", "1.1"),
    ("125", "1.25"),
    ("150", "1.5"),
];

pub const ROTATIONS: Scale = &[
    ("0", "0deg"),
    ("1", "1deg"),
    ("2", "2deg"),
    ("3", "3deg"),
    ("6", "6deg"),
    ("12", "12deg"),
    ("45", "45deg"),
    ("90", "90deg"),
    ("180", "180deg"),
];

pub const SKEWS: Scale = &[
    ("0", "0deg"),
    ("1", "1deg"),
    ("2", "2deg"),
    ("3", "3deg"),
    ("6", "6deg"),
    ("12", "12deg"),
];

pub const ORIGINS: Scale = &[
    ("center", "center"),
    ("top", "top"),
    ("top-right", "top right"),
    ("right", "right"),
    ("bottom-right", "bottom right"),
    ("bottom", "bottom"),
    ("bottom-left", "bottom left"),
    ("left", "left"),
    ("top-left", "top left"),
];

pub const CURSORS: Scale = &[
    ("auto", "auto"),
    ("default", "default"),
    ("pointer", "pointer"),
    ("wait", "wait"),
    ("text", "text"),
    ("move", "move"),
    ("help", "help"),
    ("not-allowed", "not-allowed"),
];

pub const POINTER_EVENTS: Scale = &[("none", "none"), ("auto", "auto")];

pub const COLOR_KEYWORDS: Scale = &[
    ("inherit", "inherit"),
    ("current", "currentColor"),
    ("transparent", "transparent"),
    ("black", "#000000"),
    ("white", "#ffffff"),
];

pub const SHADES: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

/// Color families, one hex value per entry of `SHADES`.
pub const PALETTE: &[(&str, [&str; 11])] = &[
    ("slate", ["#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155", "#1e293b", "#0f172a", "#020617"]),
    ("gray", ["#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151", "#1f2937", "#111827", "#030712"]),
    ("zinc", ["#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46", "#27272a", "#18181b", "#09090b"]),
    ("neutral", ["#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040", "#262626", "#171717", "#0a0a0a"]),
    ("stone", ["#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c", "#292524", "#1c1917", "#0c0a09"]),
    ("red", ["#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a"]),
    ("orange", ["#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c", "#9a3412", "#7c2d12", "#431407"]),
    ("amber", ["#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309", "#92400e", "#78350f", "#451a03"]),
    ("yellow", ["#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207", "#854d0e", "#713f12", "#422006"]),
    ("lime", ["#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f", "#3f6212", "#365314", "#1a2e05"]),
    ("green", ["#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d", "#166534", "#14532d", "#052e16"]),
    ("emerald", ["#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857", "#065f46", "#064e3b", "#022c22"]),
    ("teal", ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a", "#042f2e"]),
    ("cyan", ["#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490", "#155e75", "#164e63", "#083344"]),
    ("sky", ["#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1", "#075985", "#0c4a6e", "#082f49"]),
    ("blue", ["#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554"]),
    ("indigo", ["#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca", "#3730a3", "#312e81", "#1e1b4b"]),
    ("violet", ["#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#2e1065"]),
    ("purple", ["#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce", "#6b21a8", "#581c87", "#3b0764"]),
    ("fuchsia", ["#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf", "#86198f", "#701a75", "#4a044e"]),
    ("pink", ["#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d", "#831843", "#500724"]),
    ("rose", ["#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c", "#9f1239", "#881337", "#4c0519"]),
];
