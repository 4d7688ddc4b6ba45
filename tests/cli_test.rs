use std::io::{BufRead, Cursor};

use battleship_cpu::{
    play_match,
    ui::{coord_to_string, describe_shot, parse_coord, render_grid},
    CliPlayer, FleetConfig, Grid, Ocean, Orientation, Outcome, Player, SharedInput, ShipKind,
    ShotReport, Side, TargetingError,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("A1"), Ok((0, 0)));
    assert_eq!(parse_coord("i9"), Ok((8, 8)));
    assert_eq!(parse_coord(" c4 "), Ok((3, 2)));
    assert!(parse_coord("").is_err());
    assert!(parse_coord("A").is_err());
    assert!(parse_coord("J1").is_err());
    assert!(parse_coord("A0").is_err());
    assert!(parse_coord("A10").is_err());
    assert!(parse_coord("5A").is_err());
    assert_eq!(coord_to_string(0, 2), "C1");
    assert_eq!(parse_coord(&coord_to_string(6, 7)), Ok((6, 7)));
}

#[test]
fn test_render_hides_ships_unless_revealed() {
    let mut ocean = Ocean::new(FleetConfig::standard());
    ocean
        .place(ShipKind::Carrier, 0, 0, Orientation::Horizontal)
        .unwrap();
    ocean.receive_attack(0, 0).unwrap();
    ocean.receive_attack(1, 0).unwrap();

    let hidden = render_grid(ocean.grid(), false);
    let shown = render_grid(ocean.grid(), true);
    assert!(hidden.starts_with("    A"));
    assert!(hidden.contains("CX"));
    assert!(hidden.contains('O'));
    let first_row = |text: &str| text.lines().nth(1).unwrap().to_string();
    assert!(!first_row(&hidden).contains("C  "));
    assert!(first_row(&shown).contains("C  "));
    assert_eq!(render_grid(&Grid::new(), false).lines().count(), 10);
}

#[test]
fn test_describe_shot() {
    let sunk = ShotReport {
        outcome: Outcome::Hit(ShipKind::PatrolBoat),
        sunk: true,
    };
    assert_eq!(describe_shot((3, 5), sunk), "F4: Hit and sunk the Patrol Boat!");
    assert_eq!(describe_shot((0, 0), ShotReport::miss()), "A1: Miss.");
}

#[test]
fn test_cli_player_reprompts() {
    let input = Cursor::new("Z9\nA1\nA1\nB2\n");
    let mut player = CliPlayer::new(input, Vec::new(), &FleetConfig::standard());

    assert_eq!(player.next_move().unwrap(), (0, 0));
    player.process_result((0, 0), Outcome::Miss).unwrap();
    assert_eq!(player.next_move().unwrap(), (1, 1));
    player
        .process_result((1, 1), Outcome::Hit(ShipKind::Submarine))
        .unwrap();
    assert!(matches!(player.next_move(), Err(TargetingError::Input(_))));

    let transcript = String::from_utf8(player.into_output()).unwrap();
    assert!(transcript.contains("Invalid coordinate"));
    assert!(transcript.contains("You have already attacked here"));
    assert!(transcript.contains("You fired at B2: Hit a Submarine!"));
}

#[test]
fn test_cli_manual_placement() {
    let input = Cursor::new("A1 H\nA1 V\nB2 V\n\n\n");
    let mut player = CliPlayer::new(input, Vec::new(), &FleetConfig::standard());
    let mut rng = SmallRng::seed_from_u64(12345);
    let mut ocean = Ocean::new(FleetConfig::standard());
    player.place_ships(&mut rng, &mut ocean).unwrap();

    assert!(ocean.is_complete());
    let carrier = ocean.placement(ShipKind::Carrier).unwrap();
    assert_eq!(
        (carrier.row, carrier.col, carrier.orientation),
        (0, 0, Orientation::Horizontal)
    );
    let battleship = ocean.placement(ShipKind::Battleship).unwrap();
    assert_eq!(
        (battleship.row, battleship.col, battleship.orientation),
        (1, 1, Orientation::Vertical)
    );
    let transcript = String::from_utf8(player.into_output()).unwrap();
    assert!(transcript.contains("Invalid placement"));
}

#[test]
fn test_own_board_follows_opponent_attacks() {
    let fleet = FleetConfig::new([(ShipKind::PatrolBoat, 2)]).unwrap();
    let mut ocean = Ocean::new(fleet.clone());
    ocean
        .place(ShipKind::PatrolBoat, 4, 4, Orientation::Horizontal)
        .unwrap();
    let mut player = CliPlayer::new(Cursor::new("B2\n"), Vec::new(), &fleet);

    let report = ocean.receive_attack(0, 0).unwrap();
    player.handle_opponent_attack((0, 0), report, ocean.grid());
    assert_eq!(player.next_move().unwrap(), (1, 1));

    let transcript = String::from_utf8(player.into_output()).unwrap();
    assert!(transcript.contains("Opponent fired at A1: Miss."));
    let own = transcript.split("Your board:").nth(1).unwrap();
    assert!(own.contains('O'));
    assert!(own.contains('P'));
}

#[test]
fn test_hotseat_game_on_one_terminal() {
    let fleet = FleetConfig::new([(ShipKind::PatrolBoat, 2)]).unwrap();
    // setup for both players, then Alice A1, Bob I9, Alice A2; every turn
    // opens with a hand-over and closes with an end-of-turn prompt
    let script = "A1 H\n\nA1 V\n\n\nA1\n\n\nI9\n\n\nA2\n\n";
    let mut input = SharedInput::new(Cursor::new(script));
    let mut alice = CliPlayer::hotseat(input.clone(), Vec::new(), &fleet, "Alice", "Bob");
    let mut bob = CliPlayer::hotseat(input.clone(), Vec::new(), &fleet, "Bob", "Alice");
    let mut rng = SmallRng::seed_from_u64(3);

    let mut alice_ocean = Ocean::new(fleet.clone());
    let mut bob_ocean = Ocean::new(fleet.clone());
    alice.place_ships(&mut rng, &mut alice_ocean).unwrap();
    bob.place_ships(&mut rng, &mut bob_ocean).unwrap();
    assert_eq!(
        alice_ocean.placement(ShipKind::PatrolBoat).unwrap().orientation,
        Orientation::Horizontal
    );
    assert_eq!(
        bob_ocean.placement(ShipKind::PatrolBoat).unwrap().orientation,
        Orientation::Vertical
    );

    {
        let mut sides = [
            Side::new(&mut alice, alice_ocean),
            Side::new(&mut bob, bob_ocean),
        ];
        let result = play_match(&mut sides, 10).unwrap();
        assert_eq!(result.winner, Some(0));
        assert_eq!(result.rounds, 2);
        assert_eq!(result.attacks, [2, 1]);
        assert!(sides[1].ocean.all_sunk());
    }

    let mut rest = String::new();
    assert_eq!(input.read_line(&mut rest).unwrap(), 0);

    let alice_log = String::from_utf8(alice.into_output()).unwrap();
    assert!(alice_log.contains("Alice, please set up your board."));
    assert!(alice_log.contains("Thank you for setting up, Alice."));
    assert!(alice_log.contains("Alice, please turn the computer so that Bob cannot see."));
    assert!(alice_log.contains("Alice's Turn"));
    assert!(alice_log.contains("Your board:"));
    assert!(alice_log.contains("You fired at A1: Hit a Patrol Boat!"));
    assert!(alice_log.contains("Opponent fired at I9: Miss."));
    assert!(alice_log.contains("You fired at A2: Hit and sunk the Patrol Boat!"));
    assert_eq!(alice_log.matches("Press Enter to end your turn:").count(), 2);

    let bob_log = String::from_utf8(bob.into_output()).unwrap();
    assert!(bob_log.contains("Bob, please turn the computer so that Alice cannot see."));
    assert!(bob_log.contains("Opponent fired at A2: Hit and sunk the Patrol Boat!"));
    assert!(!bob_log.contains("Alice's Turn"));
}
