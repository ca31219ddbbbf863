//! # Role Isolation
//!
//! Each administrative entry point answers to exactly one role, in both
//! role models, and a rejected call changes nothing.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ens_02_signature_verification::TestSigner;
    use ens_03_offchain_resolver::{
        CallOutput, ResolverCall, ResolverConfig, ResolverError, ResolverEvent, RoleModel,
        SignerUpdate,
    };
    use shared_types::Address;

    const NEW_SIGNER: Address = Address::from_low_u64(0x5151);
    const NEW_MANAGER: Address = Address::from_low_u64(0x4444);

    // =========================================================================
    // DELEGATED
    // =========================================================================

    #[test]
    fn test_signer_manager_owns_signer_set() {
        let mut world = World::delegated();

        assert_eq!(
            world.send(OWNER, ResolverCall::AddSigners(vec![NEW_SIGNER])),
            Err(ResolverError::NotSignerManager { caller: OWNER })
        );
        assert_eq!(
            world.send(GATEWAY_MANAGER, ResolverCall::RemoveSigners(vec![NEW_SIGNER])),
            Err(ResolverError::NotSignerManager {
                caller: GATEWAY_MANAGER
            })
        );

        let output = world
            .send(SIGNER_MANAGER, ResolverCall::AddSigners(vec![NEW_SIGNER, NEW_SIGNER]))
            .unwrap();
        assert_eq!(
            output.into_updates().unwrap(),
            vec![
                SignerUpdate {
                    address: NEW_SIGNER,
                    applied: true
                },
                SignerUpdate {
                    address: NEW_SIGNER,
                    applied: false
                },
            ]
        );
        assert_eq!(
            world.read(ResolverCall::IsSigner(NEW_SIGNER)).unwrap().as_bool(),
            Some(true)
        );
        assert_eq!(
            world.read(ResolverCall::Signers).unwrap().into_addresses(),
            Some(vec![world.signer.address(), NEW_SIGNER])
        );

        let last = world.host.logs_for(world.proxy).last().unwrap();
        assert_eq!(
            last.event,
            ResolverEvent::SignersAdded {
                signers: vec![NEW_SIGNER, NEW_SIGNER]
            }
        );
    }

    #[test]
    fn test_gateway_manager_owns_url() {
        let mut world = World::delegated();

        for caller in [OWNER, SIGNER_MANAGER, STRANGER] {
            assert_eq!(
                world.send(caller, ResolverCall::SetUrl("https://evil.example".into())),
                Err(ResolverError::NotGatewayManager { caller })
            );
        }

        world
            .send(GATEWAY_MANAGER, ResolverCall::SetUrl("https://gw2.example".into()))
            .unwrap();
        assert_eq!(
            world.read(ResolverCall::Url).unwrap().as_text(),
            Some("https://gw2.example")
        );
    }

    #[test]
    fn test_owner_reassigns_managers() {
        let mut world = World::delegated();

        assert_eq!(
            world.send(SIGNER_MANAGER, ResolverCall::ChangeSignerManager(NEW_MANAGER)),
            Err(ResolverError::NotOwner {
                caller: SIGNER_MANAGER
            })
        );
        assert_eq!(
            world.send(OWNER, ResolverCall::ChangeGatewayManager(Address::ZERO)),
            Err(ResolverError::ZeroAddress)
        );

        world
            .send(OWNER, ResolverCall::ChangeSignerManager(NEW_MANAGER))
            .unwrap();
        assert_eq!(
            world.host.logs_for(world.proxy).last().unwrap().event,
            ResolverEvent::SignerManagerChanged {
                previous: SIGNER_MANAGER,
                new: NEW_MANAGER
            }
        );

        // The old manager is out, the new one is in.
        assert_eq!(
            world.send(SIGNER_MANAGER, ResolverCall::AddSigners(vec![NEW_SIGNER])),
            Err(ResolverError::NotSignerManager {
                caller: SIGNER_MANAGER
            })
        );
        assert!(world
            .send(NEW_MANAGER, ResolverCall::AddSigners(vec![NEW_SIGNER]))
            .is_ok());
    }

    #[test]
    fn test_ownership_transfer() {
        let mut world = World::delegated();

        assert_eq!(
            world.send(STRANGER, ResolverCall::TransferOwnership(STRANGER)),
            Err(ResolverError::NotOwner { caller: STRANGER })
        );
        assert_eq!(
            world.send(OWNER, ResolverCall::TransferOwnership(Address::ZERO)),
            Err(ResolverError::ZeroAddress)
        );

        world
            .send(OWNER, ResolverCall::TransferOwnership(NEW_MANAGER))
            .unwrap();
        assert_eq!(
            world.read(ResolverCall::Owner),
            Ok(CallOutput::Address(NEW_MANAGER))
        );
        assert_eq!(
            world.send(OWNER, ResolverCall::ChangeSignerManager(OWNER)),
            Err(ResolverError::NotOwner { caller: OWNER })
        );
    }

    #[test]
    fn test_rejected_call_leaves_no_trace() {
        let mut world = World::delegated();
        let logs = world.host.logs().len();
        let url = world.read(ResolverCall::Url).unwrap();

        assert!(world
            .send(STRANGER, ResolverCall::SetUrl("https://evil.example".into()))
            .is_err());

        assert_eq!(world.host.logs().len(), logs);
        assert_eq!(world.read(ResolverCall::Url).unwrap(), url);
    }

    #[test]
    fn test_initialization_events() {
        let world = World::delegated();
        let events: Vec<_> = world
            .host
            .logs_for(world.proxy)
            .map(|log| log.event.clone())
            .collect();

        assert_eq!(
            events,
            vec![
                ResolverEvent::Upgraded {
                    implementation: world.implementation
                },
                ResolverEvent::OwnershipTransferred {
                    previous: Address::ZERO,
                    new: OWNER
                },
                ResolverEvent::SignerManagerChanged {
                    previous: Address::ZERO,
                    new: SIGNER_MANAGER
                },
                ResolverEvent::GatewayManagerChanged {
                    previous: Address::ZERO,
                    new: GATEWAY_MANAGER
                },
                ResolverEvent::UrlChanged {
                    old: String::new(),
                    new: GATEWAY_URL.to_string()
                },
                ResolverEvent::SignersAdded {
                    signers: vec![world.signer.address()]
                },
                ResolverEvent::Initialized { version: 1 },
            ]
        );
    }

    #[test]
    fn test_configured_deployment_starts_with_owner_as_managers() {
        let signer = TestSigner::from_seed(7);
        let signer_hex = signer.address().to_hex();
        let config = ResolverConfig::from_lookup(|key| match key {
            "ENS_GATEWAY_URL" => Some(GATEWAY_URL.to_string()),
            "ENS_SIGNERS" => Some(signer_hex.clone()),
            _ => None,
        })
        .unwrap();
        let mut world = World::from_config(signer, &config);

        assert_eq!(
            world.read(ResolverCall::RoleModel),
            Ok(CallOutput::RoleModel(RoleModel::Delegated))
        );
        assert_eq!(
            world.read(ResolverCall::GatewayManager).unwrap().as_address(),
            Some(OWNER)
        );

        // Handing a role away takes the owner out of it.
        world
            .send(OWNER, ResolverCall::ChangeGatewayManager(GATEWAY_MANAGER))
            .unwrap();
        assert_eq!(
            world.send(OWNER, ResolverCall::SetUrl("https://gw2.example".into())),
            Err(ResolverError::NotGatewayManager { caller: OWNER })
        );

        let lookup = world.lookup("alice.eth");
        let answer = world.answer(&world.signer, world.proxy, &lookup, OWNER);
        assert!(world.prove(&lookup, answer).is_ok());
    }

    // =========================================================================
    // SIMPLE
    // =========================================================================

    #[test]
    fn test_simple_owner_holds_every_role() {
        let mut world = World::simple();

        assert_eq!(
            world.read(ResolverCall::RoleModel),
            Ok(CallOutput::RoleModel(RoleModel::Simple))
        );
        assert_eq!(
            world.read(ResolverCall::SignerManager).unwrap().as_address(),
            Some(OWNER)
        );
        assert_eq!(
            world.read(ResolverCall::GatewayManager),
            Ok(CallOutput::Address(OWNER))
        );

        assert!(world
            .send(OWNER, ResolverCall::AddSigners(vec![NEW_SIGNER]))
            .is_ok());
        assert!(world
            .send(OWNER, ResolverCall::SetUrl("https://gw2.example".into()))
            .is_ok());
        assert_eq!(
            world.send(STRANGER, ResolverCall::RemoveSigners(vec![NEW_SIGNER])),
            Err(ResolverError::NotOwner { caller: STRANGER })
        );
    }

    #[test]
    fn test_simple_has_no_managers_to_change() {
        let mut world = World::simple();

        assert_eq!(
            world.send(OWNER, ResolverCall::ChangeSignerManager(NEW_MANAGER)),
            Err(ResolverError::UnsupportedOperation("changeSignerManager"))
        );
        assert_eq!(
            world.send(OWNER, ResolverCall::ChangeGatewayManager(NEW_MANAGER)),
            Err(ResolverError::UnsupportedOperation("changeGatewayManager"))
        );
    }
}
