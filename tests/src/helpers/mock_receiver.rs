use collection_types::{ReceiverExecuteMsg, RECEIVE_NFT_ACK};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError, StdResult,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Item;

/// How the mock answers `ReceiveNft`.
#[cw_serde]
pub enum ReceiverMode {
    Accept,
    WrongAck,
    Reject,
}

#[cw_serde]
pub struct ReceiverInstantiateMsg {
    pub mode: ReceiverMode,
}

#[cw_serde]
pub enum ReceiverQueryMsg {
    Received {},
}

#[cw_serde]
pub struct ReceivedToken {
    pub sender: String,
    pub token_id: String,
    pub msg: Binary,
}

const MODE: Item<ReceiverMode> = Item::new("mode");
const RECEIVED: Item<Vec<ReceivedToken>> = Item::new("received");

fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ReceiverInstantiateMsg,
) -> StdResult<Response> {
    MODE.save(deps.storage, &msg.mode)?;
    RECEIVED.save(deps.storage, &vec![])?;
    Ok(Response::new())
}

fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ReceiverExecuteMsg,
) -> StdResult<Response> {
    let ReceiverExecuteMsg::ReceiveNft(receive) = msg;
    let mut received = RECEIVED.load(deps.storage)?;
    received.push(ReceivedToken {
        sender: receive.sender,
        token_id: receive.token_id,
        msg: receive.msg,
    });
    RECEIVED.save(deps.storage, &received)?;

    match MODE.load(deps.storage)? {
        ReceiverMode::Accept => Ok(Response::new().set_data(RECEIVE_NFT_ACK)),
        ReceiverMode::WrongAck => Ok(Response::new().set_data(b"thanks".as_slice())),
        ReceiverMode::Reject => Err(StdError::generic_err("tokens not accepted")),
    }
}

fn query(deps: Deps, _env: Env, msg: ReceiverQueryMsg) -> StdResult<Binary> {
    match msg {
        ReceiverQueryMsg::Received {} => to_json_binary(&RECEIVED.load(deps.storage)?),
    }
}

pub fn mock_receiver_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
