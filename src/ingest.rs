use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};

use crate::extract::{parse_level, StatParser};
use crate::models::Observation;

const HERO_COLUMN: &str = "hero1";
const LEVEL_COLUMN: &str = "levelValue";
const TEXT_COLUMN: &str = "text";

pub fn read_observations(path: &Path) -> anyhow::Result<Vec<Observation>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_from(reader)
}

/// Reads observations from an already-open CSV reader. A missing
/// required column aborts the whole run; rows without a usable hero
/// name, level, or stat value are silently skipped.
pub fn read_from<R: Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<Observation>> {
    let headers: Vec<String> = reader
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut indexes = [0usize; 3];
    for (slot, wanted) in indexes
        .iter_mut()
        .zip([HERO_COLUMN, LEVEL_COLUMN, TEXT_COLUMN])
    {
        match headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(wanted))
        {
            Some(index) => *slot = index,
            None => bail!(
                "CSV is missing required column '{wanted}' (columns found: {})",
                headers.join(", ")
            ),
        }
    }
    let [hero_idx, level_idx, text_idx] = indexes;

    let parser = StatParser::new()?;
    let mut observations = Vec::new();

    for result in reader.records() {
        let record = result.context("failed to read CSV record")?;

        let hero = record.get(hero_idx).unwrap_or("").trim();
        if hero.is_empty() {
            continue;
        }
        let level = match record.get(level_idx).and_then(parse_level) {
            Some(level) => level,
            None => continue,
        };
        let value = match record.get(text_idx).and_then(|text| parser.parse_stat(text)) {
            Some(value) => value,
            None => continue,
        };

        observations.push(Observation {
            hero: hero.to_string(),
            level,
            value,
        });
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> anyhow::Result<Vec<Observation>> {
        read_from(csv::Reader::from_reader(csv.as_bytes()))
    }

    #[test]
    fn reads_well_formed_rows() {
        let rows = read(
            "hero1,levelValue,text\n\
             Archer,1,Lv.1 is +10% Attack/Defense\n\
             Archer,2,Lv.2 is +12.5% Attack/Defense\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hero, "Archer");
        assert_eq!(rows[0].level, 1);
        assert_eq!(rows[0].value, 10.0);
        assert_eq!(rows[1].value, 12.5);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let rows = read("Hero1,LEVELVALUE,Text\nMage,3,5%\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, 3);
        assert_eq!(rows[0].value, 5.0);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = read("id,hero1,levelValue,text,notes\n7,Mage,2,4%,whatever\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hero, "Mage");
    }

    #[test]
    fn unusable_rows_are_skipped() {
        let rows = read(
            "hero1,levelValue,text\n\
             ,1,10%\n\
             Mage,not-a-level,10%\n\
             Mage,2,no stat here\n\
             Mage,3,11%\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, 3);
    }

    #[test]
    fn missing_column_is_a_fatal_error() {
        let err = read("hero1,text\nArcher,10%\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("levelValue"), "got: {message}");
        assert!(message.contains("hero1, text"), "got: {message}");
    }
}
