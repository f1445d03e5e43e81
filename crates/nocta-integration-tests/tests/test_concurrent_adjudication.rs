//! # Concurrency Races
//!
//! The engine is a shared service: council members vote at the same
//! moment, and a closure call can race a late ballot. These tests drive
//! real thread races and assert the storage-level guarantees: one ballot
//! per voter, one winning resolve, one restriction write, and no ballot
//! silently dropped.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use nocta_core::{CommunityId, MemberId, Role};
use nocta_ledger::{InMemoryRestrictionLedger, LedgerError, RestrictionLedger, RestrictionRecord};
use nocta_tribunal::{
    DossierId, DossierStatus, InMemoryEvidenceStore, InMemoryRoleDirectory, NullDispatcher,
    TribunalEngine, TribunalError, Verdict,
};

/// Ledger wrapper counting restriction writes.
struct CountingLedger {
    inner: InMemoryRestrictionLedger,
    writes: AtomicUsize,
}

impl CountingLedger {
    fn new() -> Self {
        Self {
            inner: InMemoryRestrictionLedger::new(),
            writes: AtomicUsize::new(0),
        }
    }
}

impl RestrictionLedger for CountingLedger {
    fn apply_restriction(&self, member: &MemberId, note: &str) -> Result<(), LedgerError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.apply_restriction(member, note)
    }

    fn is_restricted(&self, member: &MemberId) -> bool {
        self.inner.is_restricted(member)
    }

    fn record_of(&self, member: &MemberId) -> Option<RestrictionRecord> {
        self.inner.record_of(member)
    }
}

struct Platform {
    engine: Arc<TribunalEngine>,
    directory: Arc<InMemoryRoleDirectory>,
    ledger: Arc<CountingLedger>,
}

fn platform() -> Platform {
    let directory = Arc::new(InMemoryRoleDirectory::new());
    let ledger = Arc::new(CountingLedger::new());
    let engine = Arc::new(TribunalEngine::new(
        directory.clone(),
        Arc::new(InMemoryEvidenceStore::new()),
        ledger.clone(),
        Arc::new(NullDispatcher),
    ));
    Platform {
        engine,
        directory,
        ledger,
    }
}

fn convened_dossier(p: &Platform) -> (DossierId, MemberId) {
    let principal = MemberId::new();
    p.directory.assign(principal, Role::Principal);
    let subject = MemberId::new();
    p.directory.assign(subject, Role::Member);

    let dossier = p
        .engine
        .open_dossier(
            CommunityId::new("lisboa").unwrap(),
            principal,
            subject,
            "threw a glass from the mezzanine",
        )
        .unwrap();
    let roles: BTreeSet<Role> = [Role::Principal, Role::Host].into_iter().collect();
    p.engine.convene(dossier.id, roles, 48).unwrap();
    (dossier.id, principal)
}

#[test]
fn concurrent_duplicate_votes_yield_exactly_one_ballot() {
    let p = platform();
    let (dossier_id, _) = convened_dossier(&p);
    let voter = MemberId::new();
    p.directory.assign(voter, Role::Host);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = p.engine.clone();
            thread::spawn(move || engine.cast_vote(dossier_id, voter, Verdict::Ban, None))
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => successes += 1,
            Err(TribunalError::AlreadyVoted { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
}

#[test]
fn concurrent_distinct_voters_all_land() {
    let p = platform();
    let (dossier_id, principal) = convened_dossier(&p);

    let voters: Vec<MemberId> = (0..6)
        .map(|_| {
            let voter = MemberId::new();
            p.directory.assign(voter, Role::Host);
            voter
        })
        .collect();

    let handles: Vec<_> = voters
        .into_iter()
        .map(|voter| {
            let engine = p.engine.clone();
            thread::spawn(move || engine.cast_vote(dossier_id, voter, Verdict::Suspension, None))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }

    // Six weight-1 suspension ballots: the verdict is deterministic.
    let verdict = p.engine.resolve(dossier_id, principal).unwrap();
    assert_eq!(verdict, Verdict::Suspension);
}

#[test]
fn concurrent_resolves_pick_exactly_one_winner() {
    let p = platform();
    let (dossier_id, principal) = convened_dossier(&p);
    let host = MemberId::new();
    p.directory.assign(host, Role::Host);
    p.engine
        .cast_vote(dossier_id, host, Verdict::Ban, None)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = p.engine.clone();
            thread::spawn(move || engine.resolve(dossier_id, principal))
        })
        .collect();

    let mut successes = 0;
    let mut already_closed = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(verdict) => {
                assert_eq!(verdict, Verdict::Ban);
                successes += 1;
            }
            Err(TribunalError::DossierClosed { .. }) => already_closed += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(already_closed, 7);
    // The restriction was applied exactly once despite eight racers.
    assert_eq!(p.ledger.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn ballots_racing_a_closure_either_land_or_fail_loudly() {
    let p = platform();
    let (dossier_id, principal) = convened_dossier(&p);

    let voters: Vec<MemberId> = (0..12)
        .map(|_| {
            let voter = MemberId::new();
            p.directory.assign(voter, Role::Host);
            voter
        })
        .collect();

    let mut handles = Vec::new();
    for voter in voters {
        let engine = p.engine.clone();
        handles.push(thread::spawn(move || {
            engine
                .cast_vote(dossier_id, voter, Verdict::Absolution, None)
                .map(|_| ())
        }));
    }
    let closer = {
        let engine = p.engine.clone();
        thread::spawn(move || engine.resolve(dossier_id, principal).map(|_| ()))
    };

    let mut vote_outcomes = Vec::new();
    for handle in handles {
        vote_outcomes.push(handle.join().unwrap());
    }
    assert!(closer.join().unwrap().is_ok());

    // Every ballot either committed before the closure or failed with the
    // closed-dossier error — never anything in between.
    for outcome in vote_outcomes {
        match outcome {
            Ok(()) => {}
            Err(TribunalError::DossierClosed { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let dossier = p.engine.get_dossier(&dossier_id).unwrap();
    assert_eq!(dossier.status, DossierStatus::Closed);
    assert!(dossier.final_verdict.is_some());
}
