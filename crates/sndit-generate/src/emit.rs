//! Source emission for one asset group.
//!
//! The output depends only on the group and the options passed in: no
//! timestamps, no absolute paths, and assets in ordinal order, so an
//! unchanged tree regenerates byte-identical files.

use std::fmt::Write as _;

use crate::scan::AssetGroup;

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by sndit. DO NOT EDIT.";

/// Renders the Rust source for `group`.
///
/// `module_path` is where the `sndit` runtime is reachable from the
/// generated file; `type_name` names the identifier enum.
#[must_use]
pub fn render(group: &AssetGroup, module_path: &str, type_name: &str) -> String {
    let name = &group.name;
    let mut out = String::with_capacity(1024 + group.assets.len() * 192);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "//! Embedded audio assets for the `{name}` group.");
    let _ = writeln!(out, "//!");
    let _ = writeln!(out, "//! Mount this file as the `{name}` module.");
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Module name this group was generated for.");
    let _ = writeln!(out, "pub const GROUP: &str = {name:?};");
    let _ = writeln!(out);

    let _ = writeln!(out, "/// Assets in the `{name}` group.");
    let _ = writeln!(out, "#[allow(non_camel_case_types)]");
    let _ = writeln!(
        out,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]"
    );
    let _ = writeln!(out, "#[repr(u32)]");
    let _ = writeln!(out, "pub enum {type_name} {{");
    for asset in &group.assets {
        let _ = writeln!(out, "    /// {:?}", asset.file_name);
        let _ = writeln!(out, "    {} = {},", asset.identifier, asset.ordinal);
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl {module_path}::SoundId for {type_name} {{");
    let _ = writeln!(out, "    const ALL: &'static [Self] = &[");
    for asset in &group.assets {
        let _ = writeln!(out, "        Self::{},", asset.identifier);
    }
    let _ = writeln!(out, "    ];");
    let _ = writeln!(out);
    let _ = writeln!(out, "    fn ordinal(self) -> u32 {{");
    let _ = writeln!(out, "        self as u32");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    fn file_name(self) -> &'static str {{");
    let _ = writeln!(out, "        match self {{");
    for asset in &group.assets {
        let _ = writeln!(
            out,
            "            Self::{} => {:?},",
            asset.identifier, asset.file_name
        );
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    fn bytes(self) -> &'static [u8] {{");
    let _ = writeln!(out, "        match self {{");
    for asset in &group.assets {
        let _ = writeln!(
            out,
            "            Self::{} => include_bytes!({:?}),",
            asset.identifier, asset.file_name
        );
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}
