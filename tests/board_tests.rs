use battleship_cpu::{
    in_bounds, neighbours, BoardError, Cell, FleetConfig, Grid, MoveRejection, Ocean, Orientation,
    Outcome, ShipKind, ShotReport, TargetingError, BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn new_grid_is_unknown() {
    let grid = Grid::new();
    assert_eq!(grid.count(|c| c == Cell::Unknown), BOARD_SIZE * BOARD_SIZE);
    assert!(grid.all_ships_sunk());
    assert_eq!(grid.get(BOARD_SIZE, 0), None);
    assert!(in_bounds(8, 8));
    assert!(!in_bounds(9, 0));
    assert!(!in_bounds(0, 9));
}

#[test]
fn neighbours_stay_on_board() {
    assert_eq!(neighbours((0, 0)).collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);
    assert_eq!(
        neighbours((4, 4)).collect::<Vec<_>>(),
        vec![(3, 4), (5, 4), (4, 3), (4, 5)]
    );
    assert_eq!(neighbours((8, 8)).count(), 2);
}

#[test]
fn test_manual_place_and_sink() {
    let fleet = FleetConfig::new([(ShipKind::PatrolBoat, 2)]).unwrap();
    let mut ocean = Ocean::new(fleet);
    ocean
        .place(ShipKind::PatrolBoat, 3, 4, Orientation::Horizontal)
        .unwrap();
    assert!(ocean.is_complete());
    assert_eq!(ocean.grid().get(3, 5), Some(Cell::Ship(ShipKind::PatrolBoat)));

    assert_eq!(ocean.receive_attack(0, 0).unwrap(), ShotReport::miss());
    assert_eq!(
        ocean.receive_attack(3, 4).unwrap(),
        ShotReport {
            outcome: Outcome::Hit(ShipKind::PatrolBoat),
            sunk: false
        }
    );
    assert!(!ocean.all_sunk());
    assert_eq!(
        ocean.receive_attack(3, 5).unwrap(),
        ShotReport {
            outcome: Outcome::Hit(ShipKind::PatrolBoat),
            sunk: true
        }
    );
    assert_eq!(ocean.health(ShipKind::PatrolBoat), Some(0));
    assert!(ocean.all_sunk());

    assert_eq!(
        ocean.receive_attack(3, 5).unwrap_err(),
        BoardError::AlreadyAttacked { row: 3, col: 5 }
    );
    assert_eq!(
        ocean.receive_attack(0, BOARD_SIZE).unwrap_err(),
        BoardError::OutOfBounds {
            row: 0,
            col: BOARD_SIZE
        }
    );
}

#[test]
fn test_invalid_placements() {
    let mut ocean = Ocean::new(FleetConfig::standard());
    ocean
        .place(ShipKind::Carrier, 0, 0, Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        ocean.place(ShipKind::Carrier, 5, 5, Orientation::Horizontal),
        Err(BoardError::ShipAlreadyPlaced(ShipKind::Carrier))
    );
    assert_eq!(
        ocean.place(ShipKind::Battleship, 0, 2, Orientation::Vertical),
        Err(BoardError::ShipOverlaps(ShipKind::Battleship))
    );
    assert_eq!(
        ocean.place(ShipKind::Battleship, 6, 0, Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds(ShipKind::Battleship))
    );
    ocean
        .place(ShipKind::Battleship, 8, 5, Orientation::Horizontal)
        .unwrap();
    assert!(!ocean.is_complete());

    let mut small = Ocean::new(FleetConfig::new([(ShipKind::Submarine, 3)]).unwrap());
    assert_eq!(
        small.place(ShipKind::Carrier, 0, 0, Orientation::Horizontal),
        Err(BoardError::ShipNotInFleet(ShipKind::Carrier))
    );
}

#[test]
fn test_random_fleet_keeps_fixed_ships() {
    let mut rng = SmallRng::seed_from_u64(42);
    let fleet = FleetConfig::standard();
    let mut ocean = Ocean::new(fleet.clone());
    ocean
        .place(ShipKind::Carrier, 4, 0, Orientation::Horizontal)
        .unwrap();
    ocean.place_fleet_randomly(&mut rng).unwrap();

    assert!(ocean.is_complete());
    let carrier = ocean.placement(ShipKind::Carrier).unwrap();
    assert_eq!((carrier.row, carrier.col), (4, 0));
    assert_eq!(
        ocean.grid().count(|c| matches!(c, Cell::Ship(_))),
        fleet.total_cells()
    );
}

#[test]
fn test_reproducible_random_placement() {
    let fleet = FleetConfig::standard();
    let mut a = Ocean::new(fleet.clone());
    let mut b = Ocean::new(fleet);
    a.place_fleet_randomly(&mut SmallRng::seed_from_u64(7)).unwrap();
    b.place_fleet_randomly(&mut SmallRng::seed_from_u64(7)).unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn resolved_cells_cannot_be_recorded_twice() {
    assert!(!Cell::Unknown.is_resolved());
    assert!(!Cell::Ship(ShipKind::Carrier).is_resolved());
    assert!(Cell::Miss.is_resolved());
    assert!(Cell::Hit(ShipKind::Carrier).is_resolved());

    let mut grid = Grid::new();
    grid.record((2, 2), Outcome::Hit(ShipKind::Submarine)).unwrap();
    assert_eq!(
        grid.record((2, 2), Outcome::Miss),
        Err(TargetingError::InvalidMove {
            row: 2,
            col: 2,
            reason: MoveRejection::AlreadyResolved
        })
    );
    assert_eq!(grid.get(2, 2), Some(Cell::Hit(ShipKind::Submarine)));
    assert_eq!(
        grid.record((0, BOARD_SIZE), Outcome::Miss),
        Err(TargetingError::InvalidMove {
            row: 0,
            col: BOARD_SIZE,
            reason: MoveRejection::OutOfBounds
        })
    );

    let mut ocean = Ocean::new(FleetConfig::new([(ShipKind::PatrolBoat, 2)]).unwrap());
    ocean
        .place(ShipKind::PatrolBoat, 0, 0, Orientation::Vertical)
        .unwrap();
    assert_eq!(ocean.receive_attack(4, 4).unwrap(), ShotReport::miss());
    assert_eq!(
        ocean.receive_attack(4, 4),
        Err(BoardError::AlreadyAttacked { row: 4, col: 4 })
    );
    ocean.receive_attack(0, 0).unwrap();
    assert_eq!(
        ocean.receive_attack(0, 0),
        Err(BoardError::AlreadyAttacked { row: 0, col: 0 })
    );
    assert_eq!(ocean.health(ShipKind::PatrolBoat), Some(1));
}
