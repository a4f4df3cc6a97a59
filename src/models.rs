use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate;
use crate::segments;

/// A single usable observation: one CSV row that yielded a hero name,
/// a level, and a stat value.
#[derive(Debug, Clone)]
pub struct Observation {
    pub hero: String,
    pub level: i64,
    pub value: f64,
}

/// A contiguous run of level transitions approximated by one averaged
/// delta. `from` and `to` are levels present in the hero's series,
/// with `from <= to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: i64,
    pub to: i64,
    pub delta: f64,
}

/// One hero's growth curve: the stat value at the lowest observed
/// level, plus the compressed delta segments above it.
#[derive(Debug, Clone, Serialize)]
pub struct HeroModel {
    pub base: f64,
    pub segments: Vec<Segment>,
}

/// The full output document: global level bounds plus one model per
/// hero. Hero names are kept verbatim, including non-ASCII text.
#[derive(Debug, Serialize)]
pub struct Model {
    pub levels_min: i64,
    pub levels_max: i64,
    pub heroes: BTreeMap<String, HeroModel>,
}

impl Model {
    /// Aggregates raw observations per hero and compresses each hero's
    /// level series. With no observations at all, the level bounds
    /// default to 0..0 and the hero map is empty.
    pub fn from_observations(observations: &[Observation], tol: f64) -> Self {
        let aggregation = aggregate::aggregate(observations);

        let mut heroes = BTreeMap::new();
        for (hero, series) in aggregation.series {
            let (base, segs) = segments::compress(&series, tol);
            heroes.insert(
                hero,
                HeroModel {
                    base,
                    segments: segs,
                },
            );
        }

        Model {
            levels_min: aggregation.levels.first().copied().unwrap_or(0),
            levels_max: aggregation.levels.last().copied().unwrap_or(0),
            heroes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::DEFAULT_TOL;

    fn obs(hero: &str, level: i64, value: f64) -> Observation {
        Observation {
            hero: hero.to_string(),
            level,
            value,
        }
    }

    #[test]
    fn archer_example_end_to_end() {
        // Level 4 has a duplicate observation; its median is 14.5.
        let observations = vec![
            obs("Archer", 1, 10.0),
            obs("Archer", 2, 12.0),
            obs("Archer", 3, 14.5),
            obs("Archer", 4, 14.5),
            obs("Archer", 4, 14.5),
        ];

        let model = Model::from_observations(&observations, DEFAULT_TOL);
        assert_eq!(model.levels_min, 1);
        assert_eq!(model.levels_max, 4);

        let archer = &model.heroes["Archer"];
        assert_eq!(archer.base, 10.0);
        assert_eq!(
            archer.segments,
            vec![
                Segment {
                    from: 2,
                    to: 2,
                    delta: 2.0
                },
                Segment {
                    from: 3,
                    to: 3,
                    delta: 2.5
                },
                Segment {
                    from: 4,
                    to: 4,
                    delta: 0.0
                },
            ]
        );
    }

    #[test]
    fn empty_input_defaults_level_bounds_to_zero() {
        let model = Model::from_observations(&[], DEFAULT_TOL);
        assert_eq!(model.levels_min, 0);
        assert_eq!(model.levels_max, 0);
        assert!(model.heroes.is_empty());
    }

    #[test]
    fn non_ascii_hero_names_serialize_unescaped() {
        let observations = vec![obs("弓兵レナ", 1, 5.0)];
        let model = Model::from_observations(&observations, DEFAULT_TOL);
        let json = serde_json::to_string_pretty(&model).unwrap();
        assert!(json.contains("弓兵レナ"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn document_uses_expected_field_names() {
        let observations = vec![obs("Lancer", 1, 5.0), obs("Lancer", 2, 6.0)];
        let model = Model::from_observations(&observations, DEFAULT_TOL);
        let json = serde_json::to_string(&model).unwrap();
        for key in [
            "levels_min",
            "levels_max",
            "heroes",
            "base",
            "segments",
            "from",
            "to",
            "delta",
        ] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }
}
