//! # Upgrade Flow
//!
//! UUPS upgrades through the proxy: the owner swaps the implementation,
//! storage survives, and a failing upgrade call leaves the pointer alone.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ens_03_offchain_resolver::{
        CallOutput, Deployment, ExecutionContext, OffchainResolver, ResolverCall, ResolverCode,
        ResolverError, ResolverEvent, INITIALIZERS_DISABLED,
    };
    use shared_types::{Address, Selector};
    use std::sync::Arc;

    const V2_INTERFACE: Selector = Selector::new([0xde, 0xad, 0xbe, 0xef]);

    /// Second resolver version: same behaviour plus one extra interface.
    struct ResolverV2 {
        inner: OffchainResolver,
    }

    impl ResolverCode for ResolverV2 {
        fn name(&self) -> &str {
            "OffchainResolverV2"
        }

        fn execute(
            &self,
            ctx: &mut ExecutionContext<'_>,
            call: &ResolverCall,
        ) -> Result<CallOutput, ResolverError> {
            match call {
                ResolverCall::SupportsInterface(id) if *id == V2_INTERFACE => {
                    Ok(CallOutput::Bool(true))
                }
                other => self.inner.execute(ctx, other),
            }
        }
    }

    /// Code without an upgrade path.
    struct Frozen;

    impl ResolverCode for Frozen {
        fn name(&self) -> &str {
            "Frozen"
        }

        fn is_proxiable(&self) -> bool {
            false
        }

        fn execute(
            &self,
            _ctx: &mut ExecutionContext<'_>,
            _call: &ResolverCall,
        ) -> Result<CallOutput, ResolverError> {
            Ok(CallOutput::Unit)
        }
    }

    fn deploy_v2(world: &mut World) -> Address {
        world
            .host
            .deploy_code(
                DEPLOYER,
                Arc::new(ResolverV2 {
                    inner: OffchainResolver::new(),
                }),
                Deployment::Implementation,
            )
            .unwrap()
    }

    fn upgrade(new_implementation: Address, data: Option<ResolverCall>) -> ResolverCall {
        ResolverCall::UpgradeToAndCall {
            new_implementation,
            data: data.map(Box::new),
        }
    }

    #[test]
    fn test_owner_upgrades_and_storage_survives() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);
        let signers_before = world.read(ResolverCall::Signers).unwrap();

        assert_eq!(
            world.read(ResolverCall::SupportsInterface(V2_INTERFACE)),
            Ok(CallOutput::Bool(false))
        );

        world.send(OWNER, upgrade(v2, None)).unwrap();

        assert_eq!(world.host.implementation_slot(world.proxy), Some(v2));
        assert_eq!(
            world.read(ResolverCall::Implementation),
            Ok(CallOutput::Address(v2))
        );
        assert_eq!(
            world.read(ResolverCall::SupportsInterface(V2_INTERFACE)),
            Ok(CallOutput::Bool(true))
        );
        assert_eq!(world.read(ResolverCall::Signers).unwrap(), signers_before);
        assert_eq!(
            world.read(ResolverCall::Url).unwrap().as_text(),
            Some(GATEWAY_URL)
        );
        assert_eq!(
            world.read(ResolverCall::Owner),
            Ok(CallOutput::Address(OWNER))
        );

        let last = world.host.logs_for(world.proxy).last().unwrap();
        assert_eq!(last.event, ResolverEvent::Upgraded { implementation: v2 });
    }

    #[test]
    fn test_resolution_keeps_working_after_upgrade() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);
        world.send(OWNER, upgrade(v2, None)).unwrap();

        let lookup = world.lookup("alice.eth");
        assert_eq!(lookup.sender, world.proxy);

        let response = world.answer(&world.signer, world.proxy, &lookup, Address::from_low_u64(7));
        assert!(world.prove(&lookup, response).is_ok());
    }

    #[test]
    fn test_upgrade_and_reinitialize() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);

        world
            .send(OWNER, upgrade(v2, Some(ResolverCall::Reinitialize(2))))
            .unwrap();

        let events: Vec<_> = world
            .host
            .logs_for(world.proxy)
            .map(|log| log.event.clone())
            .collect();
        assert!(events.ends_with(&[
            ResolverEvent::Upgraded { implementation: v2 },
            ResolverEvent::Initialized { version: 2 },
        ]));

        assert_eq!(
            world.send(OWNER, ResolverCall::Reinitialize(2)),
            Err(ResolverError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_failed_upgrade_call_rolls_back_pointer() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);
        let logs_before = world.host.logs().len();

        assert_eq!(
            world.send(OWNER, upgrade(v2, Some(ResolverCall::Reinitialize(1)))),
            Err(ResolverError::AlreadyInitialized)
        );

        assert_eq!(
            world.host.implementation_slot(world.proxy),
            Some(world.implementation)
        );
        assert_eq!(world.host.logs().len(), logs_before);
    }

    #[test]
    fn test_only_owner_upgrades() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);

        for caller in [SIGNER_MANAGER, GATEWAY_MANAGER, STRANGER] {
            assert_eq!(
                world.send(caller, upgrade(v2, None)),
                Err(ResolverError::NotOwner { caller })
            );
        }
        assert_eq!(
            world.host.implementation_slot(world.proxy),
            Some(world.implementation)
        );
    }

    #[test]
    fn test_plain_upgrade_to_is_disabled() {
        let mut world = World::delegated();
        let v2 = deploy_v2(&mut world);

        assert_eq!(
            world.send(OWNER, ResolverCall::UpgradeTo(v2)),
            Err(ResolverError::UpgradeToDisabled)
        );
    }

    #[test]
    fn test_rejects_non_proxiable_targets() {
        let mut world = World::delegated();
        let frozen = world
            .host
            .deploy_code(DEPLOYER, Arc::new(Frozen), Deployment::Implementation)
            .unwrap();
        let empty = Address::from_low_u64(0x5eed);

        assert_eq!(
            world.send(OWNER, upgrade(frozen, None)),
            Err(ResolverError::InvalidImplementation(frozen))
        );
        assert_eq!(
            world.send(OWNER, upgrade(empty, None)),
            Err(ResolverError::InvalidImplementation(empty))
        );
    }

    #[test]
    fn test_implementation_is_locked() {
        let mut world = World::delegated();
        let implementation = world.implementation;

        assert!(world.host.logs_for(implementation).any(|log| {
            log.event
                == ResolverEvent::Initialized {
                    version: INITIALIZERS_DISABLED,
                }
        }));
        assert_eq!(
            world.host.call(STRANGER, implementation, &ResolverCall::Implementation),
            Err(ResolverError::NotDelegated)
        );
        assert_eq!(
            world.host.transact(
                STRANGER,
                implementation,
                ResolverCall::Initialize(ens_03_offchain_resolver::InitParams::simple(
                    "https://evil.example",
                    vec![],
                    STRANGER,
                )),
            ),
            Err(ResolverError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_proxy_with_failing_init_is_not_deployed() {
        let mut world = World::delegated();
        let bad = ens_03_offchain_resolver::InitParams::simple(GATEWAY_URL, vec![], Address::ZERO);

        assert_eq!(
            world.host.deploy_proxy(
                DEPLOYER,
                world.implementation,
                Some(ResolverCall::Initialize(bad))
            ),
            Err(ResolverError::ZeroAddress)
        );
    }
}
