//! Windows intrinsic-suppression prelude.
//!
//! Native extensions that compile C glue against the host headers on
//! Windows toolchains hit redefinition conflicts between the compiler's
//! vector intrinsic headers and the host's own vector typedefs. This
//! module renders a header prelude that must be textually included before
//! any host header. Ordered steps:
//!
//! 1. placeholder typedefs for the 16/32/64-byte vector types and the
//!    2-byte half-float type, so later conflicting definitions are
//!    pre-empted by identically-sized dummies
//! 2. the include-guard macro of every intrinsic header, so the real
//!    header bodies are never parsed
//! 3. `#undef` of every CPU-feature macro that would otherwise cause
//!    intrinsic code paths to be referenced
//!
//! The prelude never changes the meaning of code that does not reference
//! these intrinsics: it defines guards and dummies only, and emits no
//! `#include` of its own. The whole file is wrapped in `#ifdef _WIN32`,
//! making it a no-op everywhere else.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name the prelude is written under in `OUT_DIR`.
pub const PRELUDE_FILE: &str = "vo_intrin_prelude.h";

/// How the dummy typedefs are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimVariant {
    /// Unconditional typedefs. Valid when the prelude is included once.
    Plain,
    /// Each typedef wrapped in its own include-guard-style check, so the
    /// prelude tolerates being pulled in twice.
    Guarded,
}

/// Types the compiler intrinsic headers would redefine, with the byte
/// size the dummy must occupy.
const DUMMY_TYPES: &[(&str, usize)] = &[
    ("__m128h", 16),
    ("__m256h", 32),
    ("__m512h", 64),
    ("__v8hf", 16),
    ("__v16hf", 32),
    ("__v32hf", 64),
    ("_Float16", 2),
];

/// Include guards of every intrinsic header that must not be parsed.
const HEADER_GUARDS: &[&str] = &[
    "_IMMINTRIN_H",
    "_XMMINTRIN_H",
    "_EMMINTRIN_H",
    "_PMMINTRIN_H",
    "_TMMINTRIN_H",
    "_SMMINTRIN_H",
    "_NMMINTRIN_H",
    "_AVXINTRIN_H",
    "_AVX2INTRIN_H",
    "_AVX512FINTRIN_H",
    "_AVX512VLINTRIN_H",
    "_AVX512BWINTRIN_H",
    "_AVX512DQINTRIN_H",
    "_AVX512CDINTRIN_H",
    "_AVX512FP16INTRIN_H",
    "_AVX512VLFP16INTRIN_H",
    "_AVX512BF16INTRIN_H",
    "_AVX512BF16VLINTRIN_H",
    "_AVX512VBMIINTRIN_H",
    "_AVX512VBMI2INTRIN_H",
    "_AVX512VNNIINTRIN_H",
    "_AVX512VPOPCNTDQINTRIN_H",
    "_AVX512BITALGINTRIN_H",
    "_AVX512VP2INTERSECTINTRIN_H",
    "_AMXAVX512INTRIN_H",
    "_AVX10_1INTRIN_H",
    "_AVX10_1_256INTRIN_H",
    "_AVX10_1_512INTRIN_H",
    "_AVX10_2INTRIN_H",
    "_AVX10_2_256INTRIN_H",
    "_AVX10_2_512INTRIN_H",
    "_AVX10_2CONVERTINTRIN_H",
    "_AVX10_2SATCVTINTRIN_H",
    "_AVX10_2MINMAXINTRIN_H",
    "_AVX10_2MEDIAINTRIN_H",
    "_AVX10_2COPYINTRIN_H",
];

/// CPU-feature macros that would route code through intrinsic paths.
const FEATURE_MACROS: &[&str] = &[
    "__AVX__",
    "__AVX2__",
    "__AVX512F__",
    "__AVX512FP16__",
    "__AMX_AVX512__",
    "__AVX10_1__",
    "__AVX10_1_512__",
    "__AVX10_2__",
    "__AVX10_2_512__",
];

/// Render the prelude. Guard defines always precede any point where a
/// transitive include of the real intrinsic headers could occur, because
/// the prelude itself includes nothing.
pub fn render(variant: ShimVariant) -> String {
    let mut out = String::new();

    out.push_str("/* Generated by vo-abi-build. Include before any host header. */\n");
    out.push_str("#ifdef _WIN32\n\n");

    // Step 1: dummy types, before anything else can define them.
    for &(name, size) in DUMMY_TYPES {
        match variant {
            ShimVariant::Plain => {
                let _ = writeln!(out, "typedef struct {{ char dummy[{size}]; }} {name};");
            }
            ShimVariant::Guarded => {
                let _ = writeln!(out, "#ifndef VO_ABI_DUMMY_{name}");
                let _ = writeln!(out, "#define VO_ABI_DUMMY_{name}");
                let _ = writeln!(out, "typedef struct {{ char dummy[{size}]; }} {name};");
                out.push_str("#endif\n");
            }
        }
    }
    out.push('\n');

    // Step 2: pre-define every intrinsic header guard.
    for guard in HEADER_GUARDS {
        let _ = writeln!(out, "#define {guard}");
    }
    out.push('\n');

    // Step 3: drop the feature macros that reference intrinsics.
    for feature in FEATURE_MACROS {
        let _ = writeln!(out, "#ifdef {feature}");
        let _ = writeln!(out, "#undef {feature}");
        out.push_str("#endif\n");
    }

    out.push_str("\n#endif /* _WIN32 */\n");
    out
}

/// Write the prelude into `dir` and return its path. Intended to be
/// called from a build script with `OUT_DIR`.
pub fn write_prelude(dir: &Path, variant: ShimVariant) -> io::Result<PathBuf> {
    let path = dir.join(PRELUDE_FILE);
    fs::write(&path, render(variant))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_pos(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not found in prelude"))
    }

    #[test]
    fn steps_are_ordered() {
        for variant in [ShimVariant::Plain, ShimVariant::Guarded] {
            let out = render(variant);
            let typedefs = first_pos(&out, "typedef struct");
            let guards = first_pos(&out, "#define _IMMINTRIN_H");
            let undefs = first_pos(&out, "#undef __AVX__");
            assert!(typedefs < guards, "typedefs must precede header guards");
            assert!(guards < undefs, "header guards must precede feature undefs");
        }
    }

    #[test]
    fn emits_no_includes() {
        for variant in [ShimVariant::Plain, ShimVariant::Guarded] {
            assert!(!render(variant).contains("#include"));
        }
    }

    #[test]
    fn variants_cover_the_same_surface() {
        let plain = render(ShimVariant::Plain);
        let guarded = render(ShimVariant::Guarded);
        for guard in HEADER_GUARDS {
            assert!(plain.contains(&format!("#define {guard}")));
            assert!(guarded.contains(&format!("#define {guard}")));
        }
        for &(name, _) in DUMMY_TYPES {
            assert!(plain.contains(&format!("}} {name};")));
            assert!(guarded.contains(&format!("}} {name};")));
        }
    }

    #[test]
    fn guarded_variant_tolerates_double_inclusion() {
        let guarded = render(ShimVariant::Guarded);
        for &(name, _) in DUMMY_TYPES {
            assert!(guarded.contains(&format!("#ifndef VO_ABI_DUMMY_{name}")));
        }
        assert!(!render(ShimVariant::Plain).contains("VO_ABI_DUMMY_"));
    }

    #[test]
    fn dummy_sizes_match_vector_widths() {
        let out = render(ShimVariant::Plain);
        assert!(out.contains("char dummy[16]; } __m128h;"));
        assert!(out.contains("char dummy[32]; } __m256h;"));
        assert!(out.contains("char dummy[64]; } __m512h;"));
        assert!(out.contains("char dummy[2]; } _Float16;"));
    }

    #[test]
    fn windows_only() {
        let out = render(ShimVariant::Plain);
        assert!(out.starts_with("/* Generated by vo-abi-build."));
        assert!(out.contains("#ifdef _WIN32"));
        assert!(out.trim_end().ends_with("#endif /* _WIN32 */"));
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render(ShimVariant::Guarded), render(ShimVariant::Guarded));
    }
}
