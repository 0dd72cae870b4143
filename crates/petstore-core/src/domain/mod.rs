/// Pet entity as exchanged with the remote API
pub mod pet;

/// What a single fetch of the remote store produced
pub mod observation;
