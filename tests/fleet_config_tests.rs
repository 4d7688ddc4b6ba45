use battleship_cpu::{FleetConfig, FleetError, ShipKind};

#[test]
fn standard_fleet() {
    let fleet = FleetConfig::standard();
    assert_eq!(fleet.len(), 4);
    assert_eq!(fleet.total_cells(), 14);
    assert_eq!(fleet.length(ShipKind::Carrier), Some(5));
    assert_eq!(fleet.length(ShipKind::PatrolBoat), Some(2));
    assert_eq!(fleet.kinds().collect::<Vec<_>>(), ShipKind::ALL.to_vec());
}

#[test]
fn invalid_fleets_are_rejected() {
    assert_eq!(
        FleetConfig::new([(ShipKind::Carrier, 1)]),
        Err(FleetError::InvalidLength {
            kind: ShipKind::Carrier,
            length: 1
        })
    );
    assert_eq!(
        FleetConfig::new([(ShipKind::Carrier, 10)]),
        Err(FleetError::InvalidLength {
            kind: ShipKind::Carrier,
            length: 10
        })
    );
    assert_eq!(
        FleetConfig::new([(ShipKind::Submarine, 3), (ShipKind::Submarine, 3)]),
        Err(FleetError::DuplicateKind(ShipKind::Submarine))
    );
    assert_eq!(
        FleetConfig::new(Vec::<(ShipKind, usize)>::new()),
        Err(FleetError::Empty)
    );
}

#[test]
fn fleet_from_json() {
    let fleet: FleetConfig = serde_json::from_str(r#"{"Submarine": 3, "PatrolBoat": 2}"#).unwrap();
    assert_eq!(fleet.len(), 2);
    assert_eq!(fleet.total_cells(), 5);
    assert_eq!(fleet.length(ShipKind::Carrier), None);

    assert!(serde_json::from_str::<FleetConfig>(r#"{"Carrier": 12}"#).is_err());
    assert!(serde_json::from_str::<FleetConfig>(r#"{"Frigate": 3}"#).is_err());
}

#[test]
fn ship_kind_names() {
    assert_eq!("Patrol Boat".parse::<ShipKind>(), Ok(ShipKind::PatrolBoat));
    assert_eq!("carrier".parse::<ShipKind>(), Ok(ShipKind::Carrier));
    assert_eq!("s".parse::<ShipKind>(), Ok(ShipKind::Submarine));
    assert!("frigate".parse::<ShipKind>().is_err());
    assert_eq!(ShipKind::PatrolBoat.to_string(), "Patrol Boat");
}
