use crate::error::ExchangeError;
use crate::signer::Signer;
use crate::types::{CoinInfo, TransactionRecord, WithdrawalReceipt, WithdrawalRequest};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::form_urlencoded;

const COIN_CONFIG_PATH: &str = "/sapi/v1/capital/config/getall";
const WITHDRAW_HISTORY_PATH: &str = "/sapi/v1/capital/withdraw/history";
const WITHDRAW_APPLY_PATH: &str = "/sapi/v1/capital/withdraw/apply";
const SERVER_TIME_PATH: &str = "/api/v3/time";

/// The slice of the exchange API a withdrawal run needs.
#[async_trait]
pub trait Exchange {
    /// Metadata for one coin, `None` when the account does not list it.
    async fn coin_information(&self, coin: &str) -> Result<Option<CoinInfo>, ExchangeError>;

    async fn withdraw_history(&self, coin: &str) -> Result<Vec<TransactionRecord>, ExchangeError>;

    async fn withdraw(&self, request: &WithdrawalRequest)
    -> Result<WithdrawalReceipt, ExchangeError>;

    /// Full withdrawal history of `coin` and the record with id `txid`, if present.
    async fn transaction_info(
        &self,
        coin: &str,
        txid: &str,
    ) -> Result<(Vec<TransactionRecord>, Option<TransactionRecord>), ExchangeError> {
        let history = self.withdraw_history(coin).await?;
        let record = history.iter().find(|tx| tx.id == txid).cloned();
        Ok((history, record))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerTime {
    server_time: i64,
}

#[derive(Debug)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
    api_key: String,
    signer: Signer,
    /// Server clock minus local clock, in milliseconds.
    time_offset_ms: i64,
}

impl BinanceClient {
    pub fn new(base_url: &str, api_key: &str, secret: &str) -> Result<Self, ExchangeError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            signer: Signer::new(secret),
            time_offset_ms: 0,
        })
    }

    /// Aligns request timestamps with the exchange clock.
    pub async fn sync_clock(&mut self) -> Result<i64, ExchangeError> {
        let url = format!("{}{}", self.base_url, SERVER_TIME_PATH);
        let response = self.http.get(&url).send().await?;
        let time: ServerTime = Self::decode(response).await?;

        self.time_offset_ms = time.server_time - Utc::now().timestamp_millis();
        debug!("Server clock offset: {}ms", self.time_offset_ms);
        Ok(self.time_offset_ms)
    }

    fn timestamp(&self) -> i64 {
        Utc::now().timestamp_millis() + self.time_offset_ms
    }

    /// Appends the timestamp to `params` and returns the encoded, signed query.
    fn signed_query(&self, params: &[(&str, &str)]) -> String {
        let timestamp = self.timestamp().to_string();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("timestamp", &timestamp);
        let query = serializer.finish();

        let signature = self.signer.sign(&query);
        format!("{}&signature={}", query, signature)
    }

    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}?{}", self.base_url, path, self.signed_query(params));
        debug!("{} {}", method, path);

        let response = self
            .http
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ExchangeError> {
        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

/// Maps a status and body to the payload or to the exchange's `{code, msg}` error.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ExchangeError> {
    if status != StatusCode::OK {
        return Err(match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => ExchangeError::Api {
                status: status.as_u16(),
                code: err.code,
                msg: err.msg,
            },
            Err(_) => ExchangeError::Http {
                status: status.as_u16(),
                body: body.to_string(),
            },
        });
    }

    Ok(serde_json::from_str(body)?)
}

fn select_coin(coins: Vec<CoinInfo>, coin: &str) -> Option<CoinInfo> {
    coins.into_iter().find(|info| info.coin == coin)
}

#[async_trait]
impl Exchange for BinanceClient {
    async fn coin_information(&self, coin: &str) -> Result<Option<CoinInfo>, ExchangeError> {
        let coins: Vec<CoinInfo> = self.send_signed(Method::GET, COIN_CONFIG_PATH, &[]).await?;
        debug!("Account lists {} coins", coins.len());
        Ok(select_coin(coins, coin))
    }

    async fn withdraw_history(&self, coin: &str) -> Result<Vec<TransactionRecord>, ExchangeError> {
        self.send_signed(Method::GET, WITHDRAW_HISTORY_PATH, &[("coin", coin)])
            .await
    }

    async fn withdraw(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt, ExchangeError> {
        info!(
            "Withdrawing {} {} to {} via {}",
            request.amount, request.coin, request.address, request.network
        );

        self.send_signed(
            Method::POST,
            WITHDRAW_APPLY_PATH,
            &[
                ("coin", request.coin.as_str()),
                ("address", request.address.as_str()),
                ("amount", request.amount.as_str()),
                ("network", request.network.as_str()),
            ],
        )
        .await
    }
}
