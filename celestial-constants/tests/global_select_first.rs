use celestial_constants::{global, Domain};

// Runs in its own process: nothing has read the global registry yet.
#[test]
fn test_select_before_first_read_locks_in_choice() {
    global::select(Domain::Physical, "codata2010").expect("select before read");
    assert_eq!(global::get_active(Domain::Physical).unwrap(), "codata2010");

    let h = global::lookup("h").unwrap();
    assert_eq!(h.reference(), "CODATA 2010");

    let err = global::select(Domain::Physical, "codata2014").unwrap_err();
    assert!(matches!(
        err,
        celestial_constants::ConstantsError::AlreadyLocked { .. }
    ));
}
