// ABOUTME: Compile-fail case: a pod id cannot stand in for a container id.
// ABOUTME: Must fail to compile.

use podremote::types::{ContainerId, PodId};

fn takes_container_id(_id: ContainerId) {}

fn main() {
    let pod_id = PodId::new("pod123");
    takes_container_id(pod_id); // ERROR: expected ContainerId, found PodId
}
