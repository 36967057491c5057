//! Tests for data module

use std::sync::Arc;

use approx::assert_relative_eq;

use super::*;

fn sample_frame() -> DataFrame<i64> {
    DataFrame::new(vec![
        Series::new("a", vec![1i64, 2, 3, 4]),
        Series::new("b", vec![5i64, 6, 7, 8]),
        Series::new("c", vec![9i64, 10, 11, 12]),
        Series::new("d", vec![13i64, 14, 15, 16]),
    ])
    .unwrap()
}

#[test]
fn test_series_creation() {
    let int_series = Series::new("i", vec![1i64, 2, 3]);
    assert_eq!(int_series.len(), 3);
    assert_eq!(int_series.dtype(), DType::Int64);

    let float_series = Series::new("f", vec![1.0, 2.0]);
    assert_eq!(float_series.dtype(), DType::Float64);

    let bool_series = Series::new("b", vec![true, false]);
    assert_eq!(bool_series.dtype(), DType::Bool);

    let mixed = Series::new("m", vec![SeriesValue::Int(1), SeriesValue::from("x")]);
    assert_eq!(mixed.dtype(), DType::Dynamic);

    let with_null = Series::new("n", vec![SeriesValue::Null, SeriesValue::Int(4)]);
    assert_eq!(with_null.dtype(), DType::Int64);
}

#[test]
fn test_series_get() {
    let s = Series::new("x", vec![10i64, 20]);
    assert_eq!(s.get(1), Ok(&20));
    assert_eq!(
        s.get(2),
        Err(DataError::IndexOutOfBounds { index: 2, len: 2 })
    );
}

#[test]
fn test_append_variants() {
    let s = Series::new("x", vec![1i64, 2]);
    let appended = s.append([3, 4]);
    assert_eq!(appended.name(), "x");
    assert_eq!(appended.as_slice(), &[1, 2, 3, 4]);
    assert_eq!(s.as_slice(), &[1, 2]);

    let mut t = Series::new("t", vec![SeriesValue::Int(1)]);
    assert_eq!(t.dtype(), DType::Int64);
    t.append_inplace([SeriesValue::from("y")]);
    assert_eq!(t.len(), 2);
    assert_eq!(t.dtype(), DType::Dynamic);

    let other = Series::new("o", vec![9i64]);
    assert_eq!(s.concat(&other).as_slice(), &[1, 2, 9]);

    let any = s.append_any(["z"]);
    assert_eq!(
        any.as_slice(),
        &[SeriesValue::Int(1), SeriesValue::Int(2), SeriesValue::from("z")]
    );
}

#[test]
fn test_apply_and_replace() {
    let s = Series::new("x", vec![1i64, 2, 3]);
    let doubled = s.apply(|_, v| v * 2);
    assert_eq!(doubled.as_slice(), &[2, 4, 6]);

    let tagged = s.apply_any(|i, v| if i == 0 { SeriesValue::from("first") } else { (*v).into() });
    assert_eq!(tagged.as_slice()[0], SeriesValue::from("first"));
    assert_eq!(tagged.as_slice()[2], SeriesValue::Int(3));

    let replaced = s.replace([(2i64, "two")]);
    assert_eq!(
        replaced.as_slice(),
        &[SeriesValue::Int(1), SeriesValue::from("two"), SeriesValue::Int(3)]
    );

    let nan = Series::new("f", vec![f64::NAN, 1.0]);
    let replaced = nan.replace([(f64::NAN, 0.0)]);
    assert_eq!(replaced.as_slice()[0], SeriesValue::Float(0.0));
}

#[test]
fn test_sub_series() {
    let s = Series::new("x", vec!["a", "b", "c", "d"].into_iter().map(String::from).collect::<Vec<_>>());
    assert_eq!(s.sub_series(1, 3).unwrap().as_slice(), &["b", "c"]);
    assert!(s.sub_series(3, 5).is_err());
    assert!(s.sub_series(3, 2).is_err());

    let indexer: PositionSet = [3, 0].into_iter().collect();
    assert_eq!(s.sub_series_by_indexer(&indexer).as_slice(), &["a", "d"]);
    assert_eq!(s.sub_series_by_indexes(&[2, 1, 9]).as_slice(), &["b", "c"]);
}

#[test]
fn test_filter_and_reduce() {
    let s = Series::new("x", vec![1i64, 2, 3, 4]);
    assert_eq!(s.filter(|_, v| v % 2 == 0).as_slice(), &[2, 4]);
    assert_eq!(s.reduce(|a, b| a + b), Some(10));
    assert_eq!(Series::<i64>::new("e", Vec::new()).reduce(|a, b| a + b), None);

    let mut visited = Vec::new();
    s.for_each(|i, v| visited.push((i, *v)));
    assert_eq!(visited[3], (3, 4));
}

#[test]
fn test_min_max() {
    let s = Series::new("x", vec![3i64, -1, 7]);
    assert_eq!(s.min().unwrap(), Some(-1.0));
    assert_eq!(s.max().unwrap(), Some(7.0));

    let with_nan = Series::new("f", vec![1.0, f64::NAN, 3.0]);
    assert!(with_nan.max().unwrap().unwrap().is_nan());
    assert_eq!(Series::<f64>::new("e", Vec::new()).min().unwrap(), None);
    assert!(Series::new("b", vec![true]).min().is_err());
}

#[test]
fn test_drop_operations() {
    let s = Series::new("x", vec![1i64, 2, 2, 3, 1]);
    assert_eq!(s.drop_duplicates().as_slice(), &[1, 2, 3]);
    assert_eq!(s.drop_value(&2).as_slice(), &[1, 3, 1]);

    let f = Series::new("f", vec![1.0, f64::NAN, f64::NAN, 2.0]);
    let unique = f.drop_duplicates();
    assert_eq!(unique.len(), 3);
    assert_eq!(unique.as_slice()[0], 1.0);
    assert!(unique.as_slice()[1].is_nan());
    assert_eq!(unique.as_slice()[2], 2.0);
    assert_eq!(f.drop_nan().as_slice(), &[1.0, 2.0]);

    let opt = Series::new("o", vec![Some(1i64), None, Some(3)]);
    assert_eq!(opt.drop_nan().as_slice(), &[Some(1), Some(3)]);
}

#[test]
fn test_projections() {
    let f = Series::new("f", vec![1.9, -2.7]);
    assert_eq!(f.int64().unwrap().as_slice(), &[1, -2]);
    assert_eq!(f.int().unwrap().as_slice(), &[1isize, -2]);

    let missing = Series::new("f", vec![f64::NAN, 1.0]);
    assert!(matches!(
        missing.int64(),
        Err(DataError::Conversion { target: "int64", .. })
    ));
    assert!(Series::new("f", vec![f64::INFINITY]).int().is_err());

    let text = Series::new("t", vec!["4".to_string(), "5".to_string()]);
    assert_eq!(text.int64().unwrap().as_slice(), &[4, 5]);
    assert_relative_eq!(text.float64().unwrap().as_slice()[1], 5.0);

    let bad = Series::new("t", vec!["x".to_string()]);
    assert!(matches!(bad.int64(), Err(DataError::Parse { .. })));

    let b = Series::new("b", vec![true]);
    assert!(matches!(b.int64(), Err(DataError::Conversion { .. })));
    assert!(matches!(b.float64(), Err(DataError::Conversion { .. })));

    let dynamic = Series::new("d", vec![SeriesValue::Null, SeriesValue::Int(2)]);
    let floats = dynamic.float64().unwrap();
    assert!(floats.as_slice()[0].is_nan());
    assert!(dynamic.int64().is_err());
    assert_eq!(dynamic.str().as_slice(), &["null", "2"]);
    assert_eq!(Series::new("b", vec![true]).to_dynamic().as_slice(), &[SeriesValue::Bool(true)]);
}

#[test]
fn test_series_print() {
    let s = Series::new("x", vec![1i64, 22, 333]);
    assert_eq!(s.print(10, false), "0\t  1\n1\t 22\n2\t333\n");
    assert!(s.to_string().ends_with("Length: 3, dtype: int64"));

    let long = Series::new("x", (0..12i64).collect::<Vec<_>>());
    let preview = long.print(4, true);
    let lines: Vec<&str> = preview.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "0 \t  0");
    assert_eq!(lines[2], "  \t...");
    assert_eq!(lines[3], "10\t 10");
    assert_eq!(lines[5], "Length: 12, dtype: int64");
}

#[test]
fn test_dataframe_creation() {
    let df = sample_frame();
    assert_eq!(df.shape(), (4, 4));
    assert_eq!(df.names(), vec!["a", "b", "c", "d"]);
    assert_eq!(df.position("c"), Some(2));
    assert_eq!(df.name(1).unwrap(), "b");
    assert_eq!(df.dtypes(), vec![DType::Int64; 4]);

    let empty = DataFrame::<i64>::empty();
    assert_eq!(empty.shape(), (0, 0));
    assert!(empty.series().is_none());
}

#[test]
fn test_unequal_lengths_rejected() {
    let result = DataFrame::new(vec![
        Series::new("a", vec![1i64, 2]),
        Series::new("b", vec![1i64]),
    ]);
    assert!(matches!(result, Err(DataError::DimensionMismatch { .. })));

    let result = DataFrame::new(vec![
        Series::new("a", vec![1i64]),
        Series::new("a", vec![2i64]),
    ]);
    assert_eq!(result.unwrap_err(), DataError::DuplicateColumn("a".to_string()));
}

#[test]
fn test_builder() {
    let df = DataFrameBuilder::new()
        .with_column("x", vec![1.0, 2.0])
        .unwrap()
        .with_column("y", vec![3.0, 4.0])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(df.shape(), (2, 2));

    let result = DataFrameBuilder::new()
        .with_column("x", vec![1.0])
        .unwrap()
        .with_column("y", vec![3.0, 4.0]);
    assert!(result.is_err());
}

#[test]
fn test_val_and_get() {
    let df = sample_frame();
    assert_eq!(df.val(1, "b"), Ok(&6));
    assert_eq!(df.val(3, 0usize), Ok(&4));
    assert_eq!(df.val(0, "z"), Err(DataError::ColumnNotFound("z".to_string())));
    assert_eq!(df.val(0, 9usize), Err(DataError::IndexOutOfBounds { index: 9, len: 4 }));
    assert!(matches!(df.val(9, "a"), Err(DataError::IndexOutOfBounds { .. })));

    assert!(df.get("zz").is_none());
    assert_eq!(df.get("d").unwrap().as_slice(), &[13, 14, 15, 16]);
    assert!(df.get_by_index(4).is_err());
}

#[test]
fn test_location() {
    let df = sample_frame();

    let sub = df.location(":", "1:3").unwrap();
    assert_eq!(sub.shape(), (4, 2));
    assert_eq!(sub.names(), vec!["b", "c"]);

    let sub = df.location(vec![3usize, 1], [2usize, 0]).unwrap();
    assert_eq!(sub.names(), vec!["a", "c"]);
    assert_eq!(sub.get("a").unwrap().as_slice(), &[2, 4]);

    let sub = df.location(2usize, ":").unwrap();
    assert_eq!(sub.to_rows().unwrap(), vec![vec![3, 7, 11, 15]]);

    let sub = df.location("3:1", ":").unwrap();
    assert_eq!(sub.shape(), (0, 4));

    assert!(matches!(
        df.location("1:2:3", ":"),
        Err(DataError::InvalidSelector(_))
    ));
}

#[test]
fn test_drop_column() {
    let df = sample_frame();
    let dropped = df.drop_column("b").unwrap();
    assert_eq!(dropped.names(), vec!["a", "c", "d"]);
    assert_eq!(dropped.position("c"), Some(1));
    assert!(Arc::ptr_eq(dropped.shared(0).unwrap(), df.shared(0).unwrap()));
    assert_eq!(df.ncols(), 4);

    let mut df = df;
    df.drop_column_inplace(0usize).unwrap();
    assert_eq!(df.names(), vec!["b", "c", "d"]);
    assert_eq!(df.position("b"), Some(0));
    assert!(df.drop_column_inplace("missing").is_err());
}

#[test]
fn test_rename() {
    let df = sample_frame();
    let renamer = Renamer::new().position(0, "first").name("a", "ignored").name("c", "third");
    let renamed = df.rename(&renamer).unwrap();
    assert_eq!(renamed.names(), vec!["first", "b", "third", "d"]);
    assert!(Arc::ptr_eq(renamed.shared(1).unwrap(), df.shared(1).unwrap()));
    assert_eq!(df.names(), vec!["a", "b", "c", "d"]);

    let clash = Renamer::new().name("a", "b");
    assert_eq!(
        df.rename(&clash).unwrap_err(),
        DataError::DuplicateColumn("b".to_string())
    );
}

#[test]
fn test_rename_inplace_does_not_leak() {
    let mut df = sample_frame();
    let copy = df.shallow_copy();
    assert!(Arc::ptr_eq(copy.shared(0).unwrap(), df.shared(0).unwrap()));

    df.rename_inplace(&Renamer::new().name("a", "alpha")).unwrap();
    assert_eq!(df.names()[0], "alpha");
    assert_eq!(df.position("alpha"), Some(0));
    assert_eq!(copy.names()[0], "a");
    assert_eq!(copy.position("a"), Some(0));

    let before = df.names().into_iter().map(String::from).collect::<Vec<_>>();
    assert!(df.rename_inplace(&Renamer::new().name("b", "c")).is_err());
    assert_eq!(df.names(), before);
}

#[test]
fn test_rename_inplace_keeps_unshared_storage() {
    let mut df = sample_frame();
    let before = df.get_by_index(0).unwrap().as_slice().as_ptr();

    df.rename_inplace(&Renamer::new().position(0, "first")).unwrap();
    assert_eq!(df.names()[0], "first");
    assert_eq!(df.get_by_index(0).unwrap().as_slice().as_ptr(), before);
}

#[test]
fn test_insert() {
    let df = sample_frame();
    let inserted = df.insert(1, Series::new("new", vec![0i64; 4])).unwrap();
    assert_eq!(inserted.names(), vec!["a", "new", "b", "c", "d"]);
    assert_eq!(inserted.position("b"), Some(2));

    assert!(matches!(
        df.insert(0, Series::new("a", vec![0i64; 4])),
        Err(DataError::DuplicateColumn(_))
    ));
    assert!(matches!(
        df.insert(0, Series::new("z", vec![0i64; 3])),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        df.insert(5, Series::new("z", vec![0i64; 4])),
        Err(DataError::IndexOutOfBounds { index: 5, len: 4 })
    ));

    let empty = DataFrame::<i64>::empty();
    let one = empty.insert(0, Series::new("z", vec![1i64, 2, 3])).unwrap();
    assert_eq!(one.shape(), (3, 1));
}

#[test]
fn test_concat() {
    let left = sample_frame();
    let right = DataFrame::new(vec![Series::new("e", vec![0i64; 4])]).unwrap();
    let joined = left.concat(&right).unwrap();
    assert_eq!(joined.shape(), (4, 5));
    assert!(Arc::ptr_eq(joined.shared(4).unwrap(), right.shared(0).unwrap()));

    let short = DataFrame::new(vec![Series::new("e", vec![0i64; 3])]).unwrap();
    assert!(matches!(left.concat(&short), Err(DataError::DimensionMismatch { .. })));

    let empty = DataFrame::<i64>::empty();
    assert!(matches!(
        empty.concat(&left),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert_eq!(empty.concat(&empty).unwrap().shape(), (0, 0));

    let clash = DataFrame::new(vec![Series::new("c", vec![0i64; 4])]).unwrap();
    assert_eq!(
        left.concat(&clash).unwrap_err(),
        DataError::DuplicateColumn("c".to_string())
    );
}

#[test]
fn test_transpose() {
    let df = DataFrame::new(vec![
        Series::new("x", vec![1i64, 2, 3]),
        Series::new("y", vec![4i64, 5, 6]),
    ])
    .unwrap();

    let t = df.transpose().unwrap();
    assert_eq!(t.shape(), (2, 3));
    assert_eq!(t.names(), vec!["0", "1", "2"]);
    assert_eq!(t.get("1").unwrap().as_slice(), &[2, 5]);

    let tt = t.transpose().unwrap();
    assert_eq!(tt.names(), vec!["0", "1"]);
    assert_eq!(tt.to_columns(), df.to_columns());
}

#[test]
fn test_reindex_rejects_duplicates() {
    let mut df = sample_frame();
    df.reindex().unwrap();
    assert_eq!(df.position("d"), Some(3));

    let dup = df.rename(&Renamer::new().position(3, "a"));
    assert!(matches!(dup, Err(DataError::DuplicateColumn(_))));
}

#[test]
fn test_frame_projections() {
    let df = read_map(vec![
        ("n", vec!["1", "2"]),
        ("f", vec!["1.5", ""]),
    ])
    .unwrap();

    let floats = df.float64().unwrap();
    assert_eq!(floats.names(), vec!["n", "f"]);
    assert!(floats.val(1, "f").unwrap().is_nan());

    let text = df.str();
    assert_eq!(text.val(0, "f").unwrap(), "1.5");
    assert_eq!(text.position("f"), Some(1));

    assert!(matches!(
        df.int64(),
        Err(DataError::Conversion { target: "int64", .. })
    ));
    assert_eq!(df.to_dynamic().shape(), (2, 2));
    assert_eq!(df.drop_column("f").unwrap().int().unwrap().val(1, 0usize), Ok(&2isize));
}

#[test]
fn test_read_map_inference() {
    let df = read_map(vec![
        ("ints", vec!["1", "2", "3"]),
        ("floats", vec!["1.5", "2", "3"]),
        ("bools", vec!["true", "false", "true"]),
        ("mixed", vec!["1", "x", "2"]),
    ])
    .unwrap();

    assert_eq!(df.names(), vec!["ints", "floats", "bools", "mixed"]);
    assert_eq!(
        df.dtypes(),
        vec![DType::Int64, DType::Float64, DType::Bool, DType::Dynamic]
    );
    assert_eq!(df.val(1, "floats"), Ok(&SeriesValue::Float(2.0)));
    assert_eq!(df.val(0, "mixed"), Ok(&SeriesValue::Int(1)));
    assert_eq!(df.val(1, "mixed"), Ok(&SeriesValue::from("x")));
}

#[test]
fn test_read_columns() {
    let columns = vec![vec!["id", "1", "2"], vec!["name", "a", "b"]];
    let df = read_columns(&columns, true).unwrap();
    assert_eq!(df.names(), vec!["id", "name"]);
    assert_eq!(df.shape(), (2, 2));

    let df = read_columns(&columns, false).unwrap();
    assert_eq!(df.names(), vec!["0", "1"]);
    assert_eq!(df.nrows(), 3);
    assert_eq!(df.dtypes()[0], DType::Dynamic);

    let config = InferConfig {
        strategy: InferStrategy::PerCell,
    };
    let df = read_columns_with(&[vec!["x", "1", "2.5"]], true, &config).unwrap();
    assert_eq!(df.val(0, "x"), Ok(&SeriesValue::Int(1)));
    assert_eq!(df.val(1, "x"), Ok(&SeriesValue::Float(2.5)));

    let ragged = vec![vec!["a", "1"], vec!["b"]];
    assert!(read_columns(&ragged, true).is_err());
}

#[test]
fn test_data_view_and_matrix() {
    let df = sample_frame();
    let view: &dyn DataView = &df;
    assert_eq!(view.shape(), (4, 4));
    assert_eq!(view.cell_text(2, 1).as_deref(), Some("7"));
    assert_eq!(view.column_dtype(0), Some(DType::Int64));
    assert_eq!(view.row_text(0).unwrap(), vec!["1", "5", "9", "13"]);
    assert!(view.cell_value(4, 0).is_none());

    let matrix = df.as_matrix().unwrap();
    assert_eq!(matrix.dim(), (4, 4));
    assert_relative_eq!(matrix[[3, 2]], 12.0);
    assert!(DataFrame::<f64>::empty().as_matrix().unwrap().is_empty());
}

#[test]
fn test_display() {
    let df = DataFrame::new(vec![Series::new("x", vec![1.0])]).unwrap();
    assert_eq!(df.to_string(), "DataFrame(1 rows × 1 cols)\nx\tfloat64");
}

#[cfg(feature = "proptest")]
mod props {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn sub_series_keeps_original_order(
            values in prop::collection::vec(any::<i64>(), 0..40),
            picks in prop::collection::vec(0usize..50, 0..20),
        ) {
            let s = Series::new("x", values.clone());
            let out = s.sub_series_by_indexes(&picks);
            let expected: Vec<i64> = values
                .iter()
                .enumerate()
                .filter(|(i, _)| picks.contains(i))
                .map(|(_, v)| *v)
                .collect();
            prop_assert_eq!(out.as_slice(), expected.as_slice());
        }

        #[test]
        fn integer_tokens_infer_int64(values in prop::collection::vec(any::<i64>(), 1..20)) {
            let tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            prop_assert_eq!(determine_type(&tokens), DType::Int64);
        }

        #[test]
        fn slice_selects_half_open_range(from in 0usize..20, to in 0usize..20, len in 0usize..20) {
            let selected = Selector::from(format!("{}:{}", from, to)).resolve(len).unwrap();
            for i in 0..len {
                prop_assert_eq!(selected.contains(&i), from <= i && i < to);
            }
        }
    }
}
