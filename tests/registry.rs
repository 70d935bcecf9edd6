//! 단위 등록 규칙과 물리량 레지스트리 테스트.
//!
//! 테스트마다 이름과 차원이 겹치지 않는 물리량을 새로 만든다.
use dimunits::prelude::*;
use dimunits::quantities::{length, Length};

fn fresh(name: &str, dimensions: SIDimensions) -> Quantity {
    Quantity::new(name, dimensions)
}

#[test]
fn duplicate_explicit_abbreviation_is_rejected() {
    let q = fresh("RegDuplicate", SIDimensions::CURRENT.pow(3));
    UnitBuilder::new(&q).id("rda").name("alpha").build().unwrap();
    let err = UnitBuilder::new(&q)
        .id("rdb")
        .name("beta")
        .abbreviations(["rda"])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Unit(UnitError::DuplicateUnit { .. })), "{err}");
    assert!(q.unit_by_id("rdb").is_none());
}

#[test]
fn generated_collision_is_ignored() {
    let q = fresh("RegGenerated", SIDimensions::CURRENT.pow(4));
    let explicit = UnitBuilder::new(&q).id("rga").name("alpha").build().unwrap();
    UnitBuilder::new(&q)
        .id("rgx")
        .name("generated")
        .abbreviations(["rga"])
        .generated(true)
        .build()
        .unwrap();
    assert!(q.unit_by_id("rgx").is_none());
    assert_eq!(q.unit_by_abbreviation("rga"), Some(explicit));
}

#[test]
fn explicit_unit_replaces_generated_prefix_unit() {
    let q = fresh("RegOverride", SIDimensions::CURRENT.pow(5));
    let base = UnitBuilder::new(&q)
        .id("zz")
        .name("zeta")
        .prefixes(SiPrefixes::Unit, 1)
        .build()
        .unwrap();
    let generated = q.unit_by_abbreviation("kzz").unwrap();
    assert!(generated.is_generated());
    assert!((generated.to_base(1.0) - 1000.0).abs() < 1e-9);

    let explicit = base
        .derive_linear(1024.0, "kzz", "binary kilozeta", UnitSystem::Other)
        .unwrap();
    assert_eq!(q.unit_by_abbreviation("kzz"), Some(explicit));
}

#[test]
fn unregister_keeps_stale_standard_unit() {
    let q = fresh("RegStale", SIDimensions::CURRENT.pow(6));
    let first = UnitBuilder::new(&q).id("sta").name("first").build().unwrap();
    let second = first
        .derive_linear(2.0, "stb", "second", UnitSystem::Other)
        .unwrap();
    first.unregister();
    assert!(q.unit_by_id("sta").is_none());
    assert!(q.unit_by_abbreviation("sta").is_none());
    assert_eq!(q.unit_by_id("stb"), Some(second));
    assert_eq!(q.standard_unit(), Some(first));
}

#[test]
fn published_on_first_unit() {
    let dims = SIDimensions::CURRENT.pow(7);
    let q = fresh("RegPublished", dims);
    assert!(Quantities::by_name("RegPublished").is_none());
    UnitBuilder::new(&q).id("pub").name("published").build().unwrap();
    assert_eq!(Quantities::by_name("RegPublished"), Some(q.clone()));
    assert!(Quantities::quantities_for(dims).contains(&q));
}

#[test]
fn typed_units_and_casts() {
    let km: Unit<Length> = Unit::of("km").unwrap();
    assert_eq!(km, *length::KILOMETER);
    assert_eq!(Unit::<Length>::standard().id(), "m");
    assert!(Unit::<Length>::of("kg").is_err());

    let any = length::MILE.as_any().clone();
    assert!(Unit::<Length>::try_from_any(any).is_ok());

    let furlong = Unit::<Length>::standard()
        .derive_linear(201.168, "reg_fur", "furlong", UnitSystem::Imperial)
        .unwrap();
    assert!((furlong.scalar(1.0).si() - 201.168).abs() < 1e-12);
    assert!(Unit::<Length>::all().contains(&furlong));
}

#[test]
fn lookup_normalizes_separators() {
    let q = fresh("RegLookup", SIDimensions::CURRENT.pow(8));
    let unit = UnitBuilder::new(&q)
        .id("A8")
        .name("ampere to the eighth")
        .abbreviations(["A^8"])
        .build()
        .unwrap();
    assert_eq!(q.unit_by_abbreviation("A^8"), Some(unit.clone()));
    assert_eq!(q.unit_by_abbreviation("A8"), Some(unit.clone()));
    assert_eq!(q.unit_by_abbreviation(" A ^ 8 "), Some(unit));
}
