//! Steps that steer the fake pet store. Only valid in `@fake-only` scenarios.

use cucumber::{given, then, when};
use petstore_client::PetApi;
use petstore_core::{Expectation, Pet, PetId, VerificationError};
use pretty_assertions::assert_eq;

use crate::steps::pet_steps::{verify, CREATE_BREED};
use crate::steps::world::PetWorld;

#[given(expr = "the pet store exposes writes only after {int} reads")]
async fn store_read_lag(world: &mut PetWorld, reads: u32) {
    world.store().set_read_lag(reads);
}

#[given(expr = "the pet store rejects the next write with status {int}")]
async fn store_rejects_next_write(world: &mut PetWorld, status: u16) {
    world.store().reject_next_write(status);
}

#[when(expr = "I try to create the pet with name {string} and status {string}")]
async fn try_create_pet(world: &mut PetWorld, name: String, status: String) {
    let pet = Pet::new(world.pet_id, name, status).with_breed(CREATE_BREED);
    let outcome = world.client().create(&pet).await;
    world.last_write = Some(outcome);
}

#[then(expr = "the write should fail immediately with status {int}")]
async fn write_failed_immediately(world: &mut PetWorld, status: u16) {
    assert_eq!(world.last_write_error().status(), Some(status));
    assert_eq!(
        world.store().stats().creates,
        1,
        "A rejected create must not be retried"
    );
}

#[then(expr = "the last verification took {int} attempts")]
async fn last_verification_attempts(world: &mut PetWorld, attempts: u32) {
    let verified = world
        .last_verification
        .as_ref()
        .expect("No verification has run yet");
    assert_eq!(verified.attempts, attempts);
}

#[then(
    expr = "verifying that the pet with id {int} exists with name {string} and status {string} fails after {int} attempts with last status {int}"
)]
async fn verification_exhausts(
    world: &mut PetWorld,
    id: PetId,
    name: String,
    status: String,
    attempts: u32,
    last_status: u16,
) {
    let fetches_before = world.store().stats().fetches;

    let err = verify(world, id, &Expectation::present(name, status))
        .await
        .expect_err("Verification should have run out of attempts");

    assert_eq!(err.last_status(), Some(last_status));
    assert_eq!(
        world.store().stats().fetches - fetches_before,
        attempts as usize
    );
    assert!(matches!(
        err,
        VerificationError::Exhausted { attempts: made, .. } if made == attempts
    ));
}
