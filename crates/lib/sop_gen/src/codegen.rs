use std::fmt::Write;

use crate::{
    ir::{Arity, Bound, Level, LoopNest, Step},
    splice::Markers,
};

const INDENT: &str = "    ";

/// Renders loop nests as `switch (k)` arms of a Zig function.
pub struct ZigCodeGen {
    depth: usize,
}

impl Default for ZigCodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl ZigCodeGen {
    /// Arms sit two levels deep: inside the `fn` body and inside the `switch`.
    pub fn new() -> Self {
        Self { depth: 2 }
    }
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }
    fn indent(&self, level: usize) -> String {
        INDENT.repeat(self.depth + level)
    }
    fn gen_bound(&self, bound: Bound) -> String {
        match bound {
            Bound::Len => "n".into(),
            Bound::Var(i) => format!("l{}", i),
        }
    }
    fn gen_step(&self, level: &Level) -> String {
        let i = level.index;
        match level.step {
            Step::Partial { prev: None } => format!("const p{}: T = items[l{}];", i, i),
            Step::Partial { prev: Some(p) } => {
                format!("const p{}: T = p{} * items[l{}];", i, p, i)
            }
            Step::Accumulate { prefix } => format!("s += p{} * items[l{}];", prefix, i),
        }
    }
    fn gen_level(&self, level: &Level, out: &mut String) {
        let i = level.index;
        let pad = self.indent(i);
        writeln!(out, "{}var l{}: usize = k - {};", pad, i, level.offset).unwrap();
        writeln!(
            out,
            "{}while (l{} < {}) : (l{} += 1) {{",
            pad,
            i,
            self.gen_bound(level.upper),
            i
        )
        .unwrap();
        writeln!(out, "{}{}", self.indent(i + 1), self.gen_step(level)).unwrap();
    }
    pub fn gen_arm(&self, nest: &LoopNest) -> String {
        let mut out = String::new();
        writeln!(out, "{}{} => {{", self.indent(0), nest.arity.get()).unwrap();
        for level in &nest.levels {
            self.gen_level(level, &mut out);
        }
        for i in (1..=nest.depth()).rev() {
            writeln!(out, "{}}}", self.indent(i)).unwrap();
        }
        writeln!(out, "{}}},", self.indent(0)).unwrap();
        out
    }
    pub fn gen_body(&self) -> String {
        Arity::all()
            .map(|arity| self.gen_arm(&LoopNest::unroll(arity)))
            .collect()
    }
    /// A complete target file with an empty region between the markers.
    pub fn gen_module(&self, markers: &Markers) -> String {
        let mut s = String::new();
        writeln!(
            &mut s,
            r"//! Sum of products over every k-element combination of `items`.

/// Elementary symmetric polynomial of degree `k` over `items`.
pub fn sumOfProducts(comptime T: type, items: []const T, k: usize) T {{
    const n = items.len;
    var s: T = 0;
    switch (k) {{
        0 => return 1,
        1 => {{
            for (items[0..n]) |x| s += x;
        }},"
        )
        .unwrap();
        let pad = self.indent(0);
        writeln!(&mut s, "{}// {}", pad, markers.start).unwrap();
        writeln!(&mut s, "{}// {}", pad, markers.end).unwrap();
        writeln!(
            &mut s,
            r#"        else => @panic("arity out of range"),
    }}
    return s;
}}"#
        )
        .unwrap();
        s
    }
}

/// Switch arm for one arity.
pub fn generate(arity: Arity) -> String {
    ZigCodeGen::new().gen_arm(&LoopNest::unroll(arity))
}

/// Arms for every supported arity, ascending.
pub fn generate_body() -> String {
    ZigCodeGen::new().gen_body()
}

pub fn generate_module(markers: &Markers) -> String {
    ZigCodeGen::new().gen_module(markers)
}
