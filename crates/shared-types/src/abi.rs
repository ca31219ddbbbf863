//! # Solidity ABI Definitions
//!
//! Interfaces crossing the on-chain / off-chain boundary, and the handful of
//! encode/decode helpers the resolver, verifier and clients share.
//!
//! Every payload a gateway signs is built from these definitions: the inner
//! `IResolverService.resolve(name, data)` call that doubles as `extraData`,
//! and the `(bytes result, uint64 expires, bytes sig)` return tuple.

use crate::errors::ParseError;
use crate::primitives::{Address, Bytes, Hash, Selector};
use alloy_sol_types::{sol, SolCall, SolError};

sol! {
    /// ENSIP-10 wildcard resolution entry point.
    interface IExtendedResolver {
        function resolve(bytes name, bytes data) external view returns (bytes);
    }

    /// The call a gateway answers; its return value is the signed response.
    interface IResolverService {
        function resolve(bytes name, bytes data)
            external
            view
            returns (bytes result, uint64 expires, bytes sig);
    }

    /// Offchain resolver surface used by CCIP-Read clients.
    interface IOffchainResolver {
        error OffchainLookup(
            address sender,
            string[] urls,
            bytes callData,
            bytes4 callbackFunction,
            bytes extraData
        );

        function resolveWithProof(bytes response, bytes extraData)
            external
            view
            returns (bytes);
    }

    /// ERC-165 interface introspection.
    interface IERC165 {
        function supportsInterface(bytes4 interfaceID) external view returns (bool);
    }

    /// Inner resolution functions commonly wrapped by `resolve(name, data)`.
    interface IAddrResolver {
        function addr(bytes32 node) external view returns (address);
    }

    interface ITextResolver {
        function text(bytes32 node, string key) external view returns (string);
    }
}

/// ERC-165 interface id (`supportsInterface(bytes4)`).
pub const ERC165_INTERFACE_ID: Selector =
    Selector::new(<IERC165::supportsInterfaceCall as SolCall>::SELECTOR);

/// ENSIP-10 interface id (`resolve(bytes,bytes)`).
pub const EXTENDED_RESOLVER_INTERFACE_ID: Selector =
    Selector::new(<IExtendedResolver::resolveCall as SolCall>::SELECTOR);

/// Callback selector announced in every `OffchainLookup`.
pub const RESOLVE_WITH_PROOF_SELECTOR: Selector =
    Selector::new(<IOffchainResolver::resolveWithProofCall as SolCall>::SELECTOR);

fn abi_error(err: alloy_sol_types::Error) -> ParseError {
    ParseError::Abi(err.to_string())
}

/// Encode `IResolverService.resolve(name, data)` calldata.
#[must_use]
pub fn encode_resolve_call(name: &[u8], data: &[u8]) -> Bytes {
    let call = IResolverService::resolveCall {
        name: alloy_primitives::Bytes::copy_from_slice(name),
        data: alloy_primitives::Bytes::copy_from_slice(data),
    };
    Bytes(call.abi_encode())
}

/// Decode `IResolverService.resolve(name, data)` calldata into `(name, data)`.
pub fn decode_resolve_call(call_data: &[u8]) -> Result<(Bytes, Bytes), ParseError> {
    let call = IResolverService::resolveCall::abi_decode(call_data, true).map_err(abi_error)?;
    Ok((call.name.into(), call.data.into()))
}

/// Encode a gateway answer as the `IResolverService.resolve` return value.
#[must_use]
pub fn encode_signed_response(result: &[u8], expires: u64, signature: &[u8]) -> Bytes {
    let values = (
        alloy_primitives::Bytes::copy_from_slice(result),
        expires,
        alloy_primitives::Bytes::copy_from_slice(signature),
    );
    Bytes(IResolverService::resolveCall::abi_encode_returns(&values))
}

/// Decode a gateway answer into `(result, expires, signature)`.
pub fn decode_signed_response(response: &[u8]) -> Result<(Bytes, u64, Bytes), ParseError> {
    let ret =
        IResolverService::resolveCall::abi_decode_returns(response, true).map_err(abi_error)?;
    Ok((ret.result.into(), ret.expires, ret.sig.into()))
}

/// Encode the EIP-3668 `OffchainLookup` revert data.
#[must_use]
pub fn encode_offchain_lookup(
    sender: Address,
    urls: &[String],
    call_data: &[u8],
    callback: Selector,
    extra_data: &[u8],
) -> Bytes {
    let err = IOffchainResolver::OffchainLookup {
        sender: sender.into(),
        urls: urls.to_vec(),
        callData: alloy_primitives::Bytes::copy_from_slice(call_data),
        callbackFunction: alloy_primitives::FixedBytes::<4>::new(callback.0),
        extraData: alloy_primitives::Bytes::copy_from_slice(extra_data),
    };
    Bytes(err.abi_encode())
}

/// Encode `addr(bytes32 node)` calldata.
#[must_use]
pub fn encode_addr_call(node: Hash) -> Bytes {
    Bytes(IAddrResolver::addrCall { node: node.into() }.abi_encode())
}

/// Decode the `address` returned by `addr(bytes32)`.
pub fn decode_addr_result(result: &[u8]) -> Result<Address, ParseError> {
    let ret = IAddrResolver::addrCall::abi_decode_returns(result, true).map_err(abi_error)?;
    Ok(ret._0.into())
}

/// Encode an `address` as the `addr(bytes32)` return value.
#[must_use]
pub fn encode_addr_result(addr: Address) -> Bytes {
    let value: alloy_primitives::Address = addr.into();
    Bytes(IAddrResolver::addrCall::abi_encode_returns(&(value,)))
}

/// Encode `text(bytes32 node, string key)` calldata.
#[must_use]
pub fn encode_text_call(node: Hash, key: &str) -> Bytes {
    let call = ITextResolver::textCall {
        node: node.into(),
        key: key.to_string(),
    };
    Bytes(call.abi_encode())
}

/// Decode the `string` returned by `text(bytes32,string)`.
pub fn decode_text_result(result: &[u8]) -> Result<String, ParseError> {
    let ret = ITextResolver::textCall::abi_decode_returns(result, true).map_err(abi_error)?;
    Ok(ret._0)
}

/// Encode a `string` as the `text(bytes32,string)` return value.
#[must_use]
pub fn encode_text_result(value: &str) -> Bytes {
    Bytes(ITextResolver::textCall::abi_encode_returns(&(value.to_string(),)))
}
