use cucumber::{given, then, when};
use petstore_bdd_tests::describe_status;
use petstore_client::PetApi;
use petstore_core::{Expectation, Observation, Pet, PetId, VerificationError, Verified};
use petstore_monitoring::LogExt;
use tracing::info;

use crate::steps::world::PetWorld;

pub const CREATE_BREED: &str = "Basset";
pub const UPDATE_BREED: &str = "Pitbull";

pub async fn verify(
    world: &PetWorld,
    id: PetId,
    expectation: &Expectation,
) -> Result<Verified, VerificationError> {
    let client = world.client();
    world
        .verification_loop()
        .run(expectation, || client.fetch_by_id(id))
        .await
}

#[given(expr = "the pet with id {int} does not exist")]
async fn pet_does_not_exist(world: &mut PetWorld, id: PetId) {
    world.pet_id = id;

    let observation = world
        .client()
        .fetch_by_id(id)
        .await
        .log_err("Pre-scenario lookup failed");

    if let Ok(Observation::Found { .. }) = observation {
        info!(pet_id = id, "Removing leftover pet");
        let _ = world
            .client()
            .delete(id)
            .await
            .log_err("Pre-scenario cleanup failed");
        world.settle().await;
    }
}

#[when(expr = "I create the pet with name {string} and status {string}")]
async fn create_pet(world: &mut PetWorld, name: String, status: String) {
    let pet = Pet::new(world.pet_id, name, status).with_breed(CREATE_BREED);

    let receipt = world
        .client()
        .create(&pet)
        .await
        .log_ok("Create accepted")
        .unwrap_or_else(|e| panic!("Failed to create pet {}: {}", pet.id, e));

    world.last_write = Some(Ok(receipt));
    world.settle().await;
}

#[when(expr = "I update the pet with name {string} and status {string}")]
async fn update_pet(world: &mut PetWorld, name: String, status: String) {
    let pet = Pet::new(world.pet_id, name, status).with_breed(UPDATE_BREED);

    let receipt = world
        .client()
        .replace(&pet)
        .await
        .log_ok("Update accepted")
        .unwrap_or_else(|e| panic!("Failed to update pet {}: {}", pet.id, e));

    world.last_write = Some(Ok(receipt));
    world.settle().await;
}

#[when(expr = "I delete the pet")]
async fn delete_pet(world: &mut PetWorld) {
    let id = world.pet_id;

    let receipt = world
        .client()
        .delete(id)
        .await
        .log_ok("Delete accepted")
        .unwrap_or_else(|e| panic!("Failed to delete pet {}: {}", id, e));

    world.last_write = Some(Ok(receipt));
    world.settle().await;
}

#[then(expr = "the pet with id {int} should exist with name {string} and status {string}")]
async fn pet_should_exist(world: &mut PetWorld, id: PetId, name: String, status: String) {
    let expectation = Expectation::present(name, status);

    let verified = verify(world, id, &expectation)
        .await
        .unwrap_or_else(|e| panic!("Pet {} never matched: {}", id, e));

    world.last_verification = Some(verified);
}

#[then(expr = "the pet with id {int} should not exist")]
async fn pet_should_not_exist(world: &mut PetWorld, id: PetId) {
    let verified = match verify(world, id, &Expectation::absent()).await {
        Ok(verified) => verified,
        Err(e) => panic!(
            "Pet {} still exists (last status {}): {}",
            id,
            describe_status(e.last_status()),
            e
        ),
    };

    world.last_verification = Some(verified);
}
