// tests/reconcile.rs
use panjika_scrape::engine::{
    reconcile, rule_for, DayId, Diagnostic, DirectMarkerPairing, EventDerivedPairing, MonthSlot,
    Observation, Strategy,
};

fn direct(year: i32, month: u32, name: &str, start: &str, prev_end: &str) -> Observation {
    Observation {
        year,
        month,
        period_name: Some(name.into()),
        start_marker: Some(DayId::from(start)),
        end_marker_of_previous: Some(DayId::from(prev_end)),
        inferred_start: None,
        strategy: Strategy::DirectMarker,
    }
}

fn event(year: i32, month: u32, name: &str, day: &str) -> Observation {
    Observation {
        year,
        month,
        period_name: Some(name.into()),
        start_marker: Some(DayId::from(day)),
        end_marker_of_previous: None,
        inferred_start: None,
        strategy: Strategy::EventDerived,
    }
}

fn bengali_2020() -> Vec<Observation> {
    vec![
        direct(2020, 1, "Magh", "15/01/2020", "14/01/2020"),
        direct(2020, 2, "Falgun", "14/02/2020", "13/02/2020"),
        direct(2020, 3, "Chaitra", "14/03/2020", "13/03/2020"),
        direct(2020, 4, "Baishakh", "14/04/2020", "13/04/2020"),
    ]
}

#[test]
fn magh_runs_from_its_day_one_to_falgun_previous_end() {
    let out = reconcile(bengali_2020(), &DirectMarkerPairing);
    let magh = &out.ranges[0];
    assert_eq!(magh.month_name, "Magh");
    assert_eq!(magh.starting_date.as_str(), "15/01/2020");
    assert_eq!(magh.ending_date.as_str(), "13/02/2020");
    assert_eq!(out.ranges.len(), 3);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn output_order_does_not_depend_on_collection_order() {
    let mut shuffled = bengali_2020();
    shuffled.reverse();
    shuffled.swap(0, 2);
    assert_eq!(
        reconcile(shuffled, &DirectMarkerPairing),
        reconcile(bengali_2020(), &DirectMarkerPairing)
    );
}

#[test]
fn reconciling_twice_gives_the_same_result() {
    let a = reconcile(bengali_2020(), &DirectMarkerPairing);
    let b = reconcile(bengali_2020(), &DirectMarkerPairing);
    assert_eq!(a, b);
}

#[test]
fn missing_month_is_not_bridged() {
    let mut obs = bengali_2020();
    obs.remove(2); // March
    let out = reconcile(obs, &DirectMarkerPairing);
    let names: Vec<_> = out.ranges.iter().map(|r| r.month_name.as_str()).collect();
    assert_eq!(names, ["Magh"]);
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::Gap { after: MonthSlot::new(2020, 2), before: MonthSlot::new(2020, 4) }]
    );
}

#[test]
fn incomplete_pair_yields_exactly_one_diagnostic() {
    let mut obs = bengali_2020();
    obs[1].end_marker_of_previous = None;
    let out = reconcile(obs, &DirectMarkerPairing);
    assert_eq!(out.ranges.len(), 2);
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::Incomplete { slot: MonthSlot::new(2020, 2), field: "endMarkerOfPrevious" }]
    );
}

#[test]
fn event_ranges_start_the_day_after_the_new_moon() {
    let obs = vec![
        event(2020, 2, "Chaitra", "23-02-2020"),
        event(2020, 3, "Baishakh", "24-03-2020"),
        event(2020, 12, "Magh", "14-12-2020"),
        event(2020, 12, "Falgun", "31-12-2020"),
        event(2021, 1, "Chaitra", "29-01-2021"),
    ];
    let out = reconcile(obs, rule_for(Strategy::EventDerived));
    let chaitra = &out.ranges[0];
    assert_eq!(chaitra.starting_date.as_str(), "24-02-2020");
    assert_eq!(chaitra.ending_date.as_str(), "24-03-2020");

    let falgun = out.ranges.iter().find(|r| r.month_name == "Falgun").unwrap();
    assert_eq!(falgun.starting_date.as_str(), "01-01-2021");
    assert_eq!(falgun.ending_date.as_str(), "29-01-2021");
}

#[test]
fn observations_from_the_other_strategy_are_screened_out() {
    let mut obs = bengali_2020();
    obs.push(event(2020, 5, "Jyeshtha", "22-05-2020"));
    let out = reconcile(obs, &DirectMarkerPairing);
    assert_eq!(out.ranges.len(), 3);
    assert!(out.diagnostics.contains(&Diagnostic::WrongStrategy {
        slot: MonthSlot::new(2020, 5),
        found: Strategy::EventDerived,
    }));
}

#[test]
fn empty_input_is_empty_output() {
    for rule in [&DirectMarkerPairing as &dyn panjika_scrape::engine::PairingRule, &EventDerivedPairing] {
        let out = reconcile(Vec::new(), rule);
        assert!(out.ranges.is_empty());
        assert!(out.diagnostics.is_empty());
    }
}

#[test]
fn wrong_neighbour_cell_warns_but_keeps_the_range() {
    use panjika_scrape::engine::{normalize, EventMarker, RawExtraction};

    let jan = normalize(
        MonthSlot::new(2020, 1),
        RawExtraction::Events(vec![EventMarker {
            event_day: "31".into(),
            next_name: Some("Magh".into()),
            next_day: Some("30".into()),
        }]),
    )
    .unwrap();
    let feb = normalize(
        MonthSlot::new(2020, 2),
        RawExtraction::Events(vec![EventMarker {
            event_day: "29".into(),
            next_name: Some("Falgun".into()),
            next_day: None,
        }]),
    )
    .unwrap();

    let out = reconcile(jan.into_iter().chain(feb).collect(), &EventDerivedPairing);
    assert_eq!(out.ranges.len(), 1);
    assert_eq!(out.ranges[0].month_name, "Magh");
    assert_eq!(out.ranges[0].starting_date.as_str(), "01-02-2020");
    assert_eq!(out.ranges[0].ending_date.as_str(), "29-02-2020");
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::NeighborMismatch {
            slot: MonthSlot::new(2020, 1),
            expected: DayId::from("01-02-2020"),
            found: DayId::from("30"),
        }]
    );
    assert!(out.diagnostics[0].is_warning());
}

#[test]
fn page_with_only_a_previous_end_is_screened_out() {
    let magh = direct(2020, 1, "Magh", "15/01/2020", "14/01/2020");
    let closing_only = Observation {
        year: 2020,
        month: 2,
        period_name: None,
        start_marker: None,
        end_marker_of_previous: Some(DayId::from("13/02/2020")),
        inferred_start: None,
        strategy: Strategy::DirectMarker,
    };

    let out = reconcile(vec![magh, closing_only], &DirectMarkerPairing);
    assert!(out.ranges.is_empty());
    assert_eq!(out.diagnostics, vec![Diagnostic::Unusable { slot: MonthSlot::new(2020, 2) }]);
}
