use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::query::intent::FetchIntent;
use crate::query::state::{FetchResult, Payload, QueryState};

pub struct FetchReducer<T>(PhantomData<fn() -> T>);

impl<T: Payload> Reducer for FetchReducer<T> {
    type State = QueryState<T>;
    type Intent = FetchIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Started { token } => QueryState {
                result: FetchResult::Loading,
                token: Some(token),
                page_info: state.page_info,
            },
            FetchIntent::Succeeded {
                token,
                payload,
                page_info,
            } => {
                if state.token != Some(token) {
                    // Superseded by a later fetch
                    return state;
                }
                let page_info = page_info.or(state.page_info);
                QueryState {
                    result: FetchResult::Success {
                        payload,
                        page_info: page_info.clone(),
                    },
                    token: state.token,
                    page_info,
                }
            }
            FetchIntent::Failed { message } => QueryState {
                result: FetchResult::Error { message },
                ..state
            },
        }
    }
}
