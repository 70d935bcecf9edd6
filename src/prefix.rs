//! SI 접두어 표와 접두어 자동 생성 정책.

use serde::{Deserialize, Serialize};

/// SI 접두어 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiPrefix {
    /// ASCII 표기 (`mu`, `k` 등)
    pub textual: &'static str,
    /// 표시용 표기 (`μ`, `k` 등)
    pub display: &'static str,
    /// 이름 (`micro`, `kilo` 등)
    pub name: &'static str,
    pub factor: f64,
}

const fn prefix(textual: &'static str, display: &'static str, name: &'static str, factor: f64) -> SiPrefix {
    SiPrefix {
        textual,
        display,
        name,
        factor,
    }
}

/// yocto(1e-24)부터 yotta(1e24)까지의 20개 접두어.
pub const SI_PREFIXES: [SiPrefix; 20] = [
    prefix("y", "y", "yocto", 1e-24),
    prefix("z", "z", "zepto", 1e-21),
    prefix("a", "a", "atto", 1e-18),
    prefix("f", "f", "femto", 1e-15),
    prefix("p", "p", "pico", 1e-12),
    prefix("n", "n", "nano", 1e-9),
    prefix("mu", "μ", "micro", 1e-6),
    prefix("m", "m", "milli", 1e-3),
    prefix("c", "c", "centi", 1e-2),
    prefix("d", "d", "deci", 1e-1),
    prefix("da", "da", "deka", 1e1),
    prefix("h", "h", "hecto", 1e2),
    prefix("k", "k", "kilo", 1e3),
    prefix("M", "M", "mega", 1e6),
    prefix("G", "G", "giga", 1e9),
    prefix("T", "T", "tera", 1e12),
    prefix("P", "P", "peta", 1e15),
    prefix("E", "E", "exa", 1e18),
    prefix("Z", "Z", "zetta", 1e21),
    prefix("Y", "Y", "yotta", 1e24),
];

/// 텍스트/표시 표기 또는 이름으로 접두어를 찾는다.
pub fn find_prefix(key: &str) -> Option<&'static SiPrefix> {
    SI_PREFIXES
        .iter()
        .find(|p| p.textual == key || p.display == key || p.name == key)
}

/// 단위 등록 시 자동으로 만들 접두어 단위 계열.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiPrefixes {
    /// 접두어 단위를 만들지 않는다.
    #[default]
    None,
    /// yocto..yotta 전체 (`m` → `mm`, `km`, ...).
    Unit,
    /// deka 이상 양의 접두어만.
    UnitPositive,
    /// 역단위 계열 (`/s` → `/ms`, `/ks`, ...).
    PerUnit,
    /// 기준 단위 자체가 kilo 접두어를 가진 경우 (`kg` → `g`, `mg`, `Mg`, ...).
    Kilo,
}

impl SiPrefixes {
    pub fn as_str(self) -> &'static str {
        match self {
            SiPrefixes::None => "none",
            SiPrefixes::Unit => "unit",
            SiPrefixes::UnitPositive => "unit_positive",
            SiPrefixes::PerUnit => "per_unit",
            SiPrefixes::Kilo => "kilo",
        }
    }

    /// 정책에 포함되는 접두어 목록.
    pub fn prefixes(self) -> Vec<&'static SiPrefix> {
        match self {
            SiPrefixes::None => Vec::new(),
            SiPrefixes::Unit | SiPrefixes::PerUnit | SiPrefixes::Kilo => {
                SI_PREFIXES.iter().collect()
            }
            SiPrefixes::UnitPositive => SI_PREFIXES.iter().filter(|p| p.factor > 1.0).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_any_spelling() {
        assert_eq!(find_prefix("mu").map(|p| p.factor), Some(1e-6));
        assert_eq!(find_prefix("μ").map(|p| p.name), Some("micro"));
        assert_eq!(find_prefix("kilo").map(|p| p.textual), Some("k"));
        assert!(find_prefix("q").is_none());
    }

    #[test]
    fn positive_policy_skips_submultiples() {
        let pos = SiPrefixes::UnitPositive.prefixes();
        assert_eq!(pos.len(), 10);
        assert!(pos.iter().all(|p| p.factor >= 10.0));
        assert!(SiPrefixes::None.prefixes().is_empty());
    }
}
