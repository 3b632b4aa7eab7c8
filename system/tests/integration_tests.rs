//! Integration tests exercising a full deployment:
//! configuration → bootstrap → registration → verification → voting →
//! declaration → deposit settlement.
//!
//! These tests go through `ElectionSystem` and the shared component handles
//! the same way an orchestrator would.

use std::io::Write;

use franchise_candidates::CandidateApplication;
use franchise_election::Phase;
use franchise_escrow::Disposition;
use franchise_nullables::NullClock;
use franchise_system::{ElectionSystem, OfficerSeed, SystemConfig, SystemError};
use franchise_types::shared;
use franchise_types::{
    ActorId, Amount, Clock, ConstituencyId, ElectionError, NationalIdHash, Role, Subject,
    VoterCode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_700_000_000;
const END: u64 = START + 86_400;

fn actor(s: &str) -> ActorId {
    ActorId::new(s)
}

fn owner() -> ActorId {
    actor("owner")
}

fn config() -> SystemConfig {
    SystemConfig {
        commissioner: owner(),
        election_start: franchise_types::Timestamp::new(START),
        election_end: franchise_types::Timestamp::new(END),
        officers: (1..=3)
            .map(|n| OfficerSeed {
                actor: actor(&format!("officer{n}")),
                name: format!("Officer {n}"),
                constituency: ConstituencyId::new(n),
            })
            .collect(),
        ..Default::default()
    }
}

fn system() -> ElectionSystem {
    ElectionSystem::bootstrap(&config()).expect("bootstrap")
}

fn john_doe_id() -> NationalIdHash {
    NationalIdHash::from_hex("0x123456789012345678901234").expect("valid id")
}

fn register_and_verify_voter(system: &ElectionSystem, who: &str, constituency: u32) {
    let national_id = NationalIdHash::new([constituency as u8; 12]);
    let code = VoterCode::new(format!("{who}-code"));
    system
        .register_voter(
            &actor(who),
            who,
            30,
            national_id,
            code.clone(),
            ConstituencyId::new(constituency),
        )
        .unwrap();
    system
        .verify_voter(
            &actor(&format!("officer{constituency}")),
            &actor(who),
            &national_id,
            &code,
            true,
        )
        .unwrap();
}

fn register_candidate(system: &ElectionSystem, who: &str, constituency: u32, deposit: u128) {
    system
        .register_candidate(
            CandidateApplication {
                actor: actor(who),
                name: who.to_string(),
                party: "Democratic Party".into(),
                deposit: Amount::new(deposit),
                age: 45,
                constituency: ConstituencyId::new(constituency),
            },
            Amount::new(deposit),
        )
        .unwrap();
}

// ---------------------------------------------------------------------------
// 1. Voter registration and officer verification
// ---------------------------------------------------------------------------

#[test]
fn voter_verified_by_own_constituency_officer_only() {
    let system = system();
    let john = actor("john");
    let code = VoterCode::new("VOTER001");
    system
        .register_voter(&john, "John Doe", 25, john_doe_id(), code.clone(), ConstituencyId::new(1))
        .unwrap();

    let before = shared::read(system.voters()).voter_by_actor(&john).unwrap().clone();
    assert!(before.registered);
    assert!(!before.allowed_to_vote);

    let err = system
        .verify_voter(&actor("officer2"), &john, &john_doe_id(), &code, true)
        .unwrap_err();
    assert_eq!(
        err,
        ElectionError::ConstituencyMismatch {
            expected: ConstituencyId::new(2),
            found: ConstituencyId::new(1),
        }
    );
    assert_eq!(shared::read(system.voters()).voter_by_actor(&john).unwrap(), &before);

    system
        .verify_voter(&actor("officer1"), &john, &john_doe_id(), &code, true)
        .unwrap();
    let voters = shared::read(system.voters());
    let john_record = voters.voter(1).unwrap();
    assert_eq!(john_record.name, "John Doe");
    assert_eq!(john_record.age, 25);
    assert!(john_record.allowed_to_vote);
    assert_eq!(voters.statistics().total_verified, 1);
}

#[test]
fn second_voter_registration_rejected() {
    let system = system();
    let john = actor("john");
    let register = || {
        system.register_voter(
            &john,
            "John Doe",
            25,
            john_doe_id(),
            VoterCode::new("VOTER001"),
            ConstituencyId::new(1),
        )
    };
    register().unwrap();
    assert!(matches!(register(), Err(ElectionError::AlreadyRegistered { .. })));
    assert_eq!(shared::read(system.voters()).voter_count(), 1);
}

#[test]
fn removed_voter_not_found() {
    let system = system();
    register_and_verify_voter(&system, "alice", 1);

    let err = shared::write(system.voters())
        .emergency_remove_voter(&actor("officer1"), &actor("alice"))
        .unwrap_err();
    assert!(matches!(
        err,
        ElectionError::PermissionDenied { required: Role::Commissioner, .. }
    ));

    shared::write(system.voters())
        .emergency_remove_voter(&owner(), &actor("alice"))
        .unwrap();
    let voters = shared::read(system.voters());
    assert_eq!(
        voters.voter_by_actor(&actor("alice")).unwrap_err(),
        ElectionError::NotFound(Subject::Voter(actor("alice")))
    );
    assert_eq!(
        voters.voter(1).unwrap_err(),
        ElectionError::NotFound(Subject::VoterId(1))
    );
}

#[test]
fn removal_and_reregistration_do_not_grant_second_ballot() {
    let system = system();
    register_and_verify_voter(&system, "alice", 1);
    register_candidate(&system, "bob", 1, 10);
    system.verify_candidate(&actor("officer1"), &actor("bob"), true).unwrap();
    let now = franchise_types::Timestamp::new(START);
    system.cast_vote(&actor("alice"), &actor("bob"), now).unwrap();

    shared::write(system.voters())
        .emergency_remove_voter(&owner(), &actor("alice"))
        .unwrap();
    register_and_verify_voter(&system, "alice", 1);
    assert_eq!(
        system.cast_vote(&actor("alice"), &actor("bob"), now),
        Err(ElectionError::AlreadyVoted(actor("alice")))
    );

    let coordinator = shared::read(system.coordinator());
    assert_eq!(coordinator.votes_cast(), 1);
    let results = coordinator.tally(franchise_types::Timestamp::new(END)).unwrap();
    assert_eq!(results.total_votes, 1);
}

// ---------------------------------------------------------------------------
// 2. Candidate registration with deposit
// ---------------------------------------------------------------------------

#[test]
fn candidate_registration_and_verification() {
    let system = system();
    register_candidate(&system, "candidate1", 1, 1);
    {
        let candidates = shared::read(system.candidates());
        let record = candidates.candidate(1).unwrap();
        assert!(record.registered);
        assert!(!record.can_contest);
        assert_eq!(record.party, "Democratic Party");
        assert_eq!(candidates.escrowed_deposit(&actor("candidate1")).unwrap(), Amount::new(1));
    }

    system
        .verify_candidate(&actor("officer1"), &actor("candidate1"), true)
        .unwrap();
    let candidates = shared::read(system.candidates());
    assert!(candidates.candidate(1).unwrap().can_contest);
    let stats = candidates.statistics();
    assert_eq!(stats.total_registered, 1);
    assert_eq!(stats.total_contesting, 1);
    assert_eq!(stats.total_escrowed, Amount::new(1));
}

#[test]
fn deposit_mismatch_escrows_nothing() {
    let system = system();
    let application = CandidateApplication {
        actor: actor("candidate1"),
        name: "Candidate One".into(),
        party: "Independent".into(),
        deposit: Amount::new(1),
        age: 45,
        constituency: ConstituencyId::new(1),
    };
    let err = system
        .register_candidate(application, Amount::new(2))
        .unwrap_err();
    assert!(matches!(err, ElectionError::IncorrectDeposit { .. }));
    let candidates = shared::read(system.candidates());
    assert_eq!(candidates.candidate_count(), 0);
    assert_eq!(candidates.total_escrowed(), Amount::ZERO);
}

// ---------------------------------------------------------------------------
// 3. Linkage and commissioner-only operations
// ---------------------------------------------------------------------------

#[test]
fn registries_link_only_once() {
    let system = system();
    let err = shared::write(system.voters())
        .set_general_election(&owner(), actor("rogue-election"))
        .unwrap_err();
    assert_eq!(
        err,
        ElectionError::AlreadyLinked {
            coordinator: actor("general-election")
        }
    );
    let err = shared::write(system.candidates())
        .set_general_election(&actor("officer1"), actor("rogue-election"))
        .unwrap_err();
    assert!(matches!(err, ElectionError::PermissionDenied { .. }));
}

#[test]
fn only_commissioner_appoints() {
    let system = system();
    let err = system
        .appoint_officer(&actor("voter1"), actor("voter1"), "Test Officer", ConstituencyId::new(4))
        .unwrap_err();
    assert!(matches!(
        err,
        ElectionError::PermissionDenied { required: Role::Commissioner, .. }
    ));
    system
        .appoint_officer(&owner(), actor("officer4"), "Officer 4", ConstituencyId::new(4))
        .unwrap();
    assert!(shared::read(system.authority()).is_officer(&actor("officer4")));
}

// ---------------------------------------------------------------------------
// 4. Full election lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_election_settles_deposits() {
    let system = system();
    let clock = NullClock::new(START - 60);

    for n in 0..6 {
        register_and_verify_voter(&system, &format!("voter{n}"), 1);
    }
    register_and_verify_voter(&system, "unused", 2);
    for (who, deposit) in [("winner", 100), ("runner", 100), ("trailing", 100)] {
        register_candidate(&system, who, 1, deposit);
        system.verify_candidate(&actor("officer1"), &actor(who), true).unwrap();
    }
    register_candidate(&system, "withdrawn", 1, 50);
    register_candidate(&system, "cheat", 2, 70);

    // Too early.
    assert!(matches!(
        system.cast_vote(&actor("voter0"), &actor("winner"), clock.now()),
        Err(ElectionError::TimeWindowViolation { .. })
    ));

    clock.set(START);
    let ballots = [
        ("voter0", "winner"),
        ("voter1", "winner"),
        ("voter2", "winner"),
        ("voter3", "winner"),
        ("voter4", "runner"),
    ];
    for (voter, candidate) in ballots {
        system.cast_vote(&actor(voter), &actor(candidate), clock.now()).unwrap();
        clock.advance(10);
    }
    assert_eq!(
        system.cast_vote(&actor("voter0"), &actor("runner"), clock.now()),
        Err(ElectionError::AlreadyVoted(actor("voter0")))
    );
    assert_eq!(
        system.cast_vote(&actor("voter5"), &actor("withdrawn"), clock.now()),
        Err(ElectionError::CannotContest(actor("withdrawn")))
    );

    let (_, forfeited) = shared::write(system.candidates())
        .disqualify_candidate(&owner(), &actor("cheat"))
        .unwrap();
    assert_eq!(forfeited.unwrap().disposition, Disposition::Forfeit);

    // Not yet closed.
    assert!(matches!(
        shared::read(system.coordinator()).tally(clock.now()),
        Err(ElectionError::TimeWindowViolation { .. })
    ));
    assert!(matches!(
        system.declare_results(&owner(), clock.now()),
        Err(ElectionError::TimeWindowViolation { .. })
    ));

    clock.set(END);
    assert_eq!(shared::read(system.coordinator()).phase(clock.now()), Phase::Closed);
    assert!(matches!(
        system.cast_vote(&actor("voter5"), &actor("winner"), clock.now()),
        Err(ElectionError::TimeWindowViolation { .. })
    ));

    let declaration = system.declare_results(&owner(), clock.now()).unwrap();
    let result = declaration.results.constituency(ConstituencyId::new(1)).unwrap();
    assert_eq!(result.total_votes, 5);
    assert_eq!(result.winner, Some(actor("winner")));
    let order: Vec<_> = result.standings.iter().map(|s| s.actor.as_str()).collect();
    assert_eq!(order, ["winner", "runner", "trailing"]);

    let disposition_of = |who: &str| {
        declaration
            .settlements
            .iter()
            .find(|s| s.owner == actor(who))
            .map(|s| s.disposition)
    };
    assert_eq!(disposition_of("winner"), Some(Disposition::Refund));
    // 1 of 5 votes is 20%, above the one-sixth threshold.
    assert_eq!(disposition_of("runner"), Some(Disposition::Refund));
    assert_eq!(disposition_of("trailing"), Some(Disposition::Forfeit));
    // Never contested.
    assert_eq!(disposition_of("withdrawn"), Some(Disposition::Refund));
    assert_eq!(disposition_of("cheat"), None);

    let candidates = shared::read(system.candidates());
    assert_eq!(candidates.total_escrowed(), Amount::ZERO);
    assert_eq!(candidates.treasury(), Amount::new(170));
    drop(candidates);

    assert_eq!(
        system.declare_results(&owner(), clock.now()).unwrap_err(),
        ElectionError::ResultsAlreadyDeclared
    );
    let late = CandidateApplication {
        actor: actor("late"),
        name: "late".into(),
        party: "Democratic Party".into(),
        deposit: Amount::new(100),
        age: 45,
        constituency: ConstituencyId::new(1),
    };
    assert_eq!(
        system.register_candidate(late, Amount::new(100)).unwrap_err(),
        ElectionError::ResultsAlreadyDeclared
    );
    assert_eq!(shared::read(system.candidates()).total_escrowed(), Amount::ZERO);

    let summary = system.summary(clock.now());
    assert_eq!(summary.phase, Phase::Declared);
    assert_eq!(summary.votes_cast, 5);
}

// ---------------------------------------------------------------------------
// 5. Configuration files
// ---------------------------------------------------------------------------

#[test]
fn bootstrap_from_toml_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("franchise.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    write!(
        file,
        r#"
commissioner = "owner"
election_start = {START}
election_end = {END}
log_format = "json"

[params]
deposit_forfeiture_threshold_bps = 2500

[[officers]]
actor = "officer1"
name = "Officer 1"
constituency = 1
"#
    )
    .expect("write config");

    let config = SystemConfig::from_toml_file(&path).expect("load config");
    assert_eq!(config.params.deposit_forfeiture_threshold_bps, 2500);
    let system = ElectionSystem::bootstrap(&config).expect("bootstrap");
    let summary = system.summary(franchise_types::Timestamp::new(START));
    assert_eq!(summary.phase, Phase::Open);
    assert_eq!(summary.officers, vec![(actor("officer1"), ConstituencyId::new(1))]);

    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert_eq!(json["commissioner"], "owner");
    assert_eq!(json["phase"], "Open");
}

#[test]
fn malformed_config_rejected() {
    let err = SystemConfig::from_toml_str("election_start = \"soon\"").unwrap_err();
    assert!(matches!(err, SystemError::Config(_)));
}
