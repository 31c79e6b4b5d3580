//! Contraindications dataset parser.
//!
//! Parses `drug-contraindication.csv`.

use drug_types::ContraindicationRecord;

use crate::parser::{Row, TabularRecord};

/// Expected columns in the contraindications file.
const CONTRAINDICATION_COLUMNS: &[&str] = &[
    "drug_name",
    "manufacturer",
    "indications",
    "side_effects",
    "warnings",
    "contraindications",
];

impl TabularRecord for ContraindicationRecord {
    const COLUMNS: &'static [&'static str] = CONTRAINDICATION_COLUMNS;

    fn from_row(row: &Row<'_>) -> Option<Self> {
        Some(ContraindicationRecord {
            drug_name: row.get("drug_name").to_string(),
            manufacturer: row.get("manufacturer").to_string(),
            indications: row.get("indications").to_string(),
            side_effects: row.get("side_effects").to_string(),
            warnings: row.get("warnings").to_string(),
            contraindications: row.get("contraindications").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DatasetParser;

    #[test]
    fn test_parse_contraindication_record() {
        let input = "drug_name,manufacturer,indications,side_effects,warnings,contraindications\n\
                     DrugX,Acme,Pain relief,Nausea,Take with food,\"pregnancy, liver disease\"\n";

        let records = DatasetParser::<_, ContraindicationRecord>::from_reader(input.as_bytes())
            .unwrap()
            .parse_all()
            .0;

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.drug_name, "DrugX");
        assert_eq!(record.manufacturer, "Acme");
        assert_eq!(record.indications, "Pain relief");
        assert_eq!(record.side_effects, "Nausea");
        assert_eq!(record.warnings, "Take with food");
        assert_eq!(record.contraindications, "pregnancy, liver disease");
    }

    #[test]
    fn test_optional_columns_missing() {
        let input = "drug_name,contraindications\nDrugY,asthma\n";

        let records = DatasetParser::<_, ContraindicationRecord>::from_reader(input.as_bytes())
            .unwrap()
            .parse_all()
            .0;

        assert_eq!(records[0].drug_name, "DrugY");
        assert_eq!(records[0].warnings, "");
        assert_eq!(records[0].contraindications, "asthma");
    }
}
