use perfect_fit::sizing::{calculate_size, parse_measurement, Cup, CUP_TABLE};

#[test]
fn test_documented_examples() {
    let size = calculate_size(70, 84);
    assert_eq!(size.band, 35);
    assert_eq!(size.cup, Cup::C);
    assert_eq!(size.to_string(), "35C");

    assert_eq!(calculate_size(75, 93).to_string(), "37DD");
}

#[test]
fn test_calculation_is_deterministic() {
    for underbust in 60..=110 {
        for bust in underbust + 1..=underbust + 25 {
            assert_eq!(calculate_size(underbust, bust), calculate_size(underbust, bust));
        }
    }
}

#[test]
fn test_exact_table_differences() {
    for (diff, cup) in CUP_TABLE {
        assert_eq!(calculate_size(80, 80 + diff as u32).cup, cup);
    }
}

#[test]
fn test_band_is_half_of_rounded_underbust() {
    assert_eq!(calculate_size(68, 82).band, 35);
    assert_eq!(calculate_size(82, 96).band, 40);
    assert_eq!(calculate_size(83, 97).band, 42);
}

#[test]
fn test_user_input_to_size() {
    let underbust = parse_measurement("70 cm").unwrap();
    let bust = parse_measurement("84").unwrap();
    assert_eq!(calculate_size(underbust, bust).to_string(), "35C");
}
