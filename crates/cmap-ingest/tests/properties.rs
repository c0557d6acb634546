use cmap_ingest::{parse, profile};
use cmap_model::InferredType;
use proptest::prelude::*;

fn non_blank_lines(text: &str) -> usize {
    text.split('\n').filter(|l| !l.trim().is_empty()).count()
}

proptest! {
    #[test]
    fn row_count_matches_non_blank_lines(text in "[a-z0-9,\"\t \r\n@/]{0,200}") {
        let grid = parse(&text, ',');
        prop_assert_eq!(grid.len(), non_blank_lines(&text));
    }

    #[test]
    fn fields_are_trimmed_and_quote_free(text in "[a-z, \"\n]{0,120}") {
        let grid = parse(&text, ',');
        for row in grid.rows() {
            prop_assert!(!row.is_empty());
            for cell in row {
                prop_assert_eq!(cell.trim(), cell.as_str());
                prop_assert!(!cell.contains('"'));
            }
        }
    }

    #[test]
    fn profile_is_idempotent(text in "[a-z0-9,@/\n]{0,160}", has_header in any::<bool>()) {
        let grid = parse(&text, ',');
        prop_assert_eq!(profile(&grid, has_header), profile(&grid, has_header));
    }

    #[test]
    fn profile_width_and_sample_bound(text in "[a-z0-9,\n]{0,160}", has_header in any::<bool>()) {
        let grid = parse(&text, ',');
        let columns = profile(&grid, has_header);
        prop_assert_eq!(columns.len(), grid.width());
        for (i, column) in columns.iter().enumerate() {
            prop_assert_eq!(column.index, i);
            prop_assert!(column.sample_values.len() <= 3);
            prop_assert!(!column.name.is_empty());
        }
    }

    #[test]
    fn integer_columns_are_numbers(values in prop::collection::vec(-10_000i64..10_000, 1..20)) {
        let mut text = String::from("Count\n");
        for v in &values {
            text.push_str(&format!("{v}\n"));
        }
        let columns = profile(&parse(&text, ','), true);
        prop_assert_eq!(columns[0].inferred_type, InferredType::Number);
    }
}
