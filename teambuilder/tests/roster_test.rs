use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use teambuilder::{
    error::{
        InvalidInputError,
        NotFoundError,
        ValidationError,
    },
    teams::{
        Roster,
        RosterMember,
        RosterMemberData,
        RosterMemberUpdate,
        Team,
    },
};
use teambuilder_calc::hp_stat;
use teambuilder_data::{
    IvTable,
    MoveId,
    SpeciesId,
    StatTable,
    Type,
};
use teambuilder_prng::RealPseudoRandomNumberGenerator;
use teambuilder_test_utils::{
    ControlledRandomNumberGenerator,
    TestDataStore,
    assert_error_is,
    assert_error_message,
};
use uuid::Uuid;

const PERFECT_IVS: IvTable = IvTable {
    atk: 15,
    def: 15,
    spe: 15,
    spc: 15,
};

fn charmander(level: u8) -> RosterMemberData {
    RosterMemberData {
        species: SpeciesId(4),
        level,
        ivs: Some(PERFECT_IVS),
        ..Default::default()
    }
}

fn add(roster: &Roster, team: &mut Team, data: RosterMemberData) -> RosterMember {
    roster
        .create_member(team, data, &mut RealPseudoRandomNumberGenerator::new(Some(0)))
        .unwrap()
}

#[test]
fn creates_member_at_full_hp() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(
        &roster,
        &mut team,
        RosterMemberData {
            nickname: Some("Flame".to_owned()),
            moves: vec![None, Some(MoveId(10)), Some(MoveId(10)), Some(MoveId(45))],
            ..charmander(5)
        },
    );

    // floor((39 + 15 + 50) * 5 / 50) + 10
    assert_eq!(member.current_hp, 20);
    assert_eq!(member.team_id, team.id);
    assert_eq!(member.nickname, Some("Flame".to_owned()));
    assert_eq!(member.status, "Healthy");
    assert_eq!(member.ivs, PERFECT_IVS);
    assert_eq!(
        member.moves,
        [Some(MoveId(10)), Some(MoveId(45)), None, None]
    );
    assert_eq!(team.members, vec![member]);
}

#[test]
fn uses_configured_default_status() {
    let data = TestDataStore::new();
    let roster = Roster::with_default_status(&data, "OK");
    let mut team = Team::new("ash", "Kanto");
    assert_eq!(add(&roster, &mut team, charmander(5)).status, "OK");
    let member = add(
        &roster,
        &mut team,
        RosterMemberData {
            status: Some("Poisoned".to_owned()),
            ..charmander(5)
        },
    );
    assert_eq!(member.status, "Poisoned");
}

#[test]
fn generates_ivs_when_missing_or_zero() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");

    for ivs in [None, Some(IvTable::default())] {
        let mut prng = ControlledRandomNumberGenerator::new(Some(3));
        prng.insert_fake_values([(1, 7), (2, 0), (3, 12), (4, 9)]);
        let member = roster
            .create_member(
                &mut team,
                RosterMemberData {
                    ivs,
                    ..charmander(30)
                },
                &mut prng,
            )
            .unwrap();
        assert_eq!(
            member.ivs,
            IvTable {
                atk: 7,
                def: 0,
                spe: 12,
                spc: 9,
            }
        );
        // HP IV is 8 + 0 + 0 + 1.
        assert_eq!(member.current_hp, hp_stat(39, 30, 9, 0));
    }
}

#[test]
fn keeps_supplied_nonzero_ivs() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let ivs = IvTable {
        atk: 0,
        def: 0,
        spe: 0,
        spc: 1,
    };
    let mut prng = ControlledRandomNumberGenerator::new(Some(3));
    let member = roster
        .create_member(
            &mut team,
            RosterMemberData {
                ivs: Some(ivs),
                ..charmander(30)
            },
            &mut prng,
        )
        .unwrap();
    assert_eq!(member.ivs, ivs);
    assert_eq!(prng.sequence_count(), 0);
}

#[test]
fn rejects_member_on_full_team() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    for _ in 0..6 {
        add(&roster, &mut team, charmander(5));
    }
    let result = roster.create_member(
        &mut team,
        charmander(5),
        &mut RealPseudoRandomNumberGenerator::new(None),
    );
    assert_matches!(&result, Err(err) => assert!(err.is::<InvalidInputError>()));
    assert_error_message(result, "Team cannot have more than 6 Pokemon");
    assert_eq!(team.members.len(), 6);
}

#[test]
fn rejects_out_of_range_level_and_ivs() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let mut prng = RealPseudoRandomNumberGenerator::new(None);

    for level in [0, 101, 255] {
        assert_error_message(
            roster.create_member(&mut team, charmander(level), &mut prng),
            "Level must be between 1 and 100",
        );
    }
    assert_error_message(
        roster.create_member(
            &mut team,
            RosterMemberData {
                ivs: Some(IvTable {
                    atk: 16,
                    ..PERFECT_IVS
                }),
                ..charmander(5)
            },
            &mut prng,
        ),
        "IVs must be between 0 and 15",
    );
    assert_eq!(team.members, vec![]);
}

#[test]
fn rejects_unknown_species() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let result = roster.create_member(
        &mut team,
        RosterMemberData {
            species: SpeciesId(404),
            level: 5,
            ..Default::default()
        },
        &mut RealPseudoRandomNumberGenerator::new(None),
    );
    assert_matches!(&result, Err(err) => assert!(err.is::<NotFoundError>()));
    assert_error_message(result, "species 404 not found");
}

#[test]
fn rejects_unlearnable_moves_on_create() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let result = roster.create_member(
        &mut team,
        RosterMemberData {
            moves: vec![Some(MoveId(10)), Some(MoveId(52))],
            ..charmander(5)
        },
        &mut RealPseudoRandomNumberGenerator::new(None),
    );
    assert_matches!(result, Err(err) => {
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(
            validation.problems().collect::<Vec<_>>(),
            vec!["Pokemon cannot learn Ember at level 5"]
        );
    });
    assert_eq!(team.members, vec![]);
}

#[test]
fn level_change_recomputes_max_hp() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));
    assert_eq!(member.current_hp, 114);

    // Leveling up raises max HP without healing.
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                level: Some(100),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.level, 100);
    assert_eq!(member.current_hp, 114);

    // Leveling down clamps current HP to the new maximum.
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                level: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.current_hp, 20);
    assert_eq!(team.member(member.id), Some(&member));
}

#[test]
fn iv_change_clamps_current_hp() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                ivs: Some(IvTable {
                    atk: 14,
                    def: 14,
                    spe: 14,
                    spc: 14,
                }),
                ..Default::default()
            },
        )
        .unwrap();
    // HP IV drops from 15 to 0: floor((39 + 0 + 50) * 50 / 50) + 10.
    assert_eq!(member.current_hp, 99);
}

#[test]
fn zero_ivs_on_update_are_kept() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                ivs: Some(IvTable::default()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(member.ivs.is_zero());
}

#[test]
fn species_and_ev_changes_keep_hp_within_max() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));

    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                species: Some(SpeciesId(5)),
                evs: Some(StatTable {
                    hp: 65535,
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.species, SpeciesId(5));
    assert_eq!(member.current_hp, 114);

    let max_hp = roster.with_stats(&member).unwrap().calculated_hp;
    assert_eq!(max_hp, hp_stat(58, 50, 15, 65535));
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                current_hp: Some(max_hp),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.current_hp, max_hp);

    // Dropping the HP EV lowers max HP below the current value.
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                evs: Some(StatTable::default()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.current_hp, hp_stat(58, 50, 15, 0));
}

#[test]
fn rejects_current_hp_above_max() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));
    let result = roster.update_member(
        &mut team,
        member.id,
        RosterMemberUpdate {
            current_hp: Some(115),
            ..Default::default()
        },
    );
    assert_matches!(&result, Err(err) => assert!(err.is::<InvalidInputError>()));
    assert_error_message(result, "Current HP cannot exceed max HP (114)");
    assert_eq!(team.member(member.id), Some(&member));
}

#[test]
fn update_of_unknown_member_fails() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    add(&roster, &mut team, charmander(50));
    assert_error_is::<NotFoundError, _>(roster.update_member(
        &mut team,
        Uuid::new_v4(),
        RosterMemberUpdate::default(),
    ));
}

#[test]
fn sets_validated_moves() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(9));

    let member = roster
        .set_moves(
            &mut team,
            member.id,
            &[None, Some(MoveId(52)), None, Some(MoveId(34))],
        )
        .unwrap();
    assert_eq!(
        member.moves,
        [Some(MoveId(52)), Some(MoveId(34)), None, None]
    );

    let result = roster.set_moves(
        &mut team,
        member.id,
        &[
            Some(MoveId(10)),
            Some(MoveId(45)),
            Some(MoveId(52)),
            Some(MoveId(34)),
            Some(MoveId(53)),
        ],
    );
    assert_error_message(
        result,
        "validation failed: Pokemon can have at most 4 moves",
    );

    let result = roster.set_moves(&mut team, member.id, &[Some(MoveId(53))]);
    assert_error_message(
        result,
        "validation failed: Pokemon cannot learn Flamethrower at level 9",
    );
    assert_eq!(team.member(member.id), Some(&member));

    let member = roster.set_moves(&mut team, member.id, &[]).unwrap();
    assert_eq!(member.moves, [None; 4]);
}

#[test]
fn moves_are_validated_against_updated_level() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(5));
    let member = roster
        .update_member(
            &mut team,
            member.id,
            RosterMemberUpdate {
                level: Some(9),
                moves: Some(vec![Some(MoveId(52))]),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(member.moves[0], Some(MoveId(52)));
}

#[test]
fn cannot_delete_last_member() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let first = add(&roster, &mut team, charmander(5));
    let second = add(&roster, &mut team, charmander(6));

    assert_eq!(roster.delete_member(&mut team, first.id).unwrap(), first);
    assert_eq!(team.members, vec![second.clone()]);

    let result = roster.delete_member(&mut team, second.id);
    assert_matches!(&result, Err(err) => assert!(err.is::<InvalidInputError>()));
    assert_error_message(
        result,
        "Cannot delete the last Pokemon from a team. Teams must have at least 1 Pokemon.",
    );
    assert_error_is::<NotFoundError, _>(roster.delete_member(&mut team, first.id));
    assert_eq!(team.members.len(), 1);
}

#[test]
fn calculates_member_stats() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(&roster, &mut team, charmander(50));
    let with_stats = roster.with_stats(&member).unwrap();
    assert_eq!(with_stats.pokemon_name, "Charmander");
    assert_eq!(with_stats.type1, Type::Fire);
    assert_eq!(with_stats.type2, None);
    assert_eq!(
        with_stats.stats(),
        StatTable {
            hp: 114,
            atk: 72,
            def: 63,
            spe: 85,
            spc: 70,
        }
    );

    let json = serde_json::to_value(&with_stats).unwrap();
    assert_eq!(json["pokemon_id"], 4);
    assert_eq!(json["calculated_hp"], 114);
    assert_eq!(json["calculated_special"], 70);
    assert_eq!(json["ivs"]["attack"], 15);
}

#[test]
fn calculates_stats_for_arbitrary_inputs() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    assert_eq!(
        roster
            .calculate_stats(SpeciesId(4), 50, &PERFECT_IVS, &StatTable::default())
            .unwrap(),
        StatTable {
            hp: 114,
            atk: 72,
            def: 63,
            spe: 85,
            spc: 70,
        }
    );
    assert_error_message(
        roster.calculate_stats(SpeciesId(4), 0, &PERFECT_IVS, &StatTable::default()),
        "Level must be between 1 and 100",
    );
    assert_error_is::<NotFoundError, _>(roster.calculate_stats(
        SpeciesId(404),
        50,
        &PERFECT_IVS,
        &StatTable::default(),
    ));
}

#[test]
fn member_stats_survive_json_round_trip() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let mut team = Team::new("ash", "Kanto");
    let member = add(
        &roster,
        &mut team,
        RosterMemberData {
            ivs: Some(IvTable {
                atk: 9,
                def: 4,
                spe: 12,
                spc: 7,
            }),
            evs: StatTable {
                hp: 25600,
                atk: 10000,
                def: 0,
                spe: 65535,
                spc: 1,
            },
            ..charmander(37)
        },
    );

    let json = serde_json::to_string(&member).unwrap();
    let restored: RosterMember = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.ivs, member.ivs);
    assert_eq!(restored.evs, member.evs);
    assert_eq!(
        roster.with_stats(&restored).unwrap().stats(),
        roster.with_stats(&member).unwrap().stats()
    );
}

#[test]
fn stat_keys_map_to_stats_in_any_order() {
    let data = TestDataStore::new();
    let roster = Roster::new(&data);
    let ivs: IvTable =
        serde_json::from_str(r#"{"attack":9,"defense":4,"speed":12,"special":7}"#).unwrap();
    let reordered: IvTable =
        serde_json::from_str(r#"{"special":7,"speed":12,"defense":4,"attack":9}"#).unwrap();
    assert_eq!(ivs, reordered);
    let evs: StatTable =
        serde_json::from_str(r#"{"special":1,"hp":25600,"speed":65535,"attack":10000}"#).unwrap();
    assert_eq!(evs.def, 0);

    let stats = roster
        .calculate_stats(SpeciesId(4), 50, &ivs, &StatTable::default())
        .unwrap();
    // floor((52 + 9) * 50 / 50) + 5
    assert_eq!(stats.atk, 66);
    // floor((43 + 4) * 50 / 50) + 5
    assert_eq!(stats.def, 52);
    assert_eq!(
        roster
            .calculate_stats(SpeciesId(4), 50, &reordered, &evs)
            .unwrap(),
        roster
            .calculate_stats(SpeciesId(4), 50, &ivs, &evs)
            .unwrap()
    );
}
