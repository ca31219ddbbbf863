//! # Governance Takeover Attempts
//!
//! Hijacking initializers, upgrades and roles.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ens_03_offchain_resolver::{
        CallOutput, InitParams, ResolverCall, ResolverError, ResolverEvent,
    };
    use shared_types::Address;

    fn hostile_init() -> ResolverCall {
        ResolverCall::Initialize(InitParams::simple(
            "https://evil.example/{sender}/{data}.json",
            vec![STRANGER],
            STRANGER,
        ))
    }

    #[test]
    fn test_reinitializing_the_proxy() {
        let mut world = World::delegated();

        assert_eq!(
            world.send(STRANGER, hostile_init()),
            Err(ResolverError::AlreadyInitialized)
        );
        assert_eq!(
            world.send(STRANGER, ResolverCall::Reinitialize(9)),
            Err(ResolverError::NotOwner { caller: STRANGER })
        );
        assert_eq!(
            world.read(ResolverCall::Owner),
            Ok(CallOutput::Address(OWNER))
        );
    }

    #[test]
    fn test_taking_over_the_implementation() {
        let mut world = World::delegated();
        let implementation = world.implementation;

        assert_eq!(
            world.host.transact(STRANGER, implementation, hostile_init()),
            Err(ResolverError::AlreadyInitialized)
        );
        assert_eq!(
            world.host.transact(
                STRANGER,
                implementation,
                ResolverCall::UpgradeToAndCall {
                    new_implementation: implementation,
                    data: None,
                }
            ),
            Err(ResolverError::NotDelegated)
        );
    }

    #[test]
    fn test_uninitialized_proxy_can_be_claimed_once() {
        let mut world = World::delegated();
        let bare = world
            .host
            .deploy_proxy(DEPLOYER, world.implementation, None)
            .unwrap();

        assert!(world.host.transact(STRANGER, bare, hostile_init()).is_ok());
        assert_eq!(
            world.host.transact(OWNER, bare, hostile_init()),
            Err(ResolverError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_renounced_owner_locks_upgrades() {
        let mut world = World::delegated();
        world.send(OWNER, ResolverCall::RenounceOwnership).unwrap();

        assert_eq!(
            world.host.logs_for(world.proxy).last().unwrap().event,
            ResolverEvent::OwnershipTransferred {
                previous: OWNER,
                new: Address::ZERO
            }
        );

        let implementation = world.implementation;
        for caller in [OWNER, Address::ZERO, STRANGER] {
            assert_eq!(
                world.send(
                    caller,
                    ResolverCall::UpgradeToAndCall {
                        new_implementation: implementation,
                        data: None,
                    }
                ),
                Err(ResolverError::NotOwner { caller })
            );
        }

        // Managers keep working without an owner.
        assert!(world
            .send(GATEWAY_MANAGER, ResolverCall::SetUrl("https://gw2.example".into()))
            .is_ok());
    }

    #[test]
    fn test_renounced_simple_resolver_is_frozen() {
        let mut world = World::simple();
        world.send(OWNER, ResolverCall::RenounceOwnership).unwrap();

        assert_eq!(
            world.send(OWNER, ResolverCall::AddSigners(vec![STRANGER])),
            Err(ResolverError::NotOwner { caller: OWNER })
        );
        assert_eq!(
            world.send(Address::ZERO, ResolverCall::SetUrl("x".into())),
            Err(ResolverError::NotOwner {
                caller: Address::ZERO
            })
        );
    }

    #[test]
    fn test_managers_cannot_escalate() {
        let mut world = World::delegated();

        for caller in [SIGNER_MANAGER, GATEWAY_MANAGER] {
            assert_eq!(
                world.send(caller, ResolverCall::TransferOwnership(caller)),
                Err(ResolverError::NotOwner { caller })
            );
            assert_eq!(
                world.send(caller, ResolverCall::ChangeGatewayManager(caller)),
                Err(ResolverError::NotOwner { caller })
            );
            assert_eq!(
                world.send(caller, ResolverCall::RenounceOwnership),
                Err(ResolverError::NotOwner { caller })
            );
        }
    }

    #[test]
    fn test_zero_address_holds_no_role() {
        let mut world = World::delegated();
        world.send(OWNER, ResolverCall::RenounceOwnership).unwrap();

        // Nobody, not even a call from the zero address, can act as owner.
        assert_eq!(
            world.send(Address::ZERO, ResolverCall::TransferOwnership(STRANGER)),
            Err(ResolverError::NotOwner {
                caller: Address::ZERO
            })
        );
    }
}
