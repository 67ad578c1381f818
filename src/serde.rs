use core::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{CuckooMap, CuckooSet, Params};

impl<K, V, H> Serialize for CuckooMap<K, V, H>
where
    K: Serialize,
    V: Serialize,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<'de, K, V, S> Deserialize<'de> for CuckooMap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor<K, V, S> {
            marker: PhantomData<CuckooMap<K, V, S>>,
        }

        impl<'de, K, V, S> Visitor<'de> for MapVisitor<K, V, S>
        where
            K: Deserialize<'de> + Eq + Hash,
            V: Deserialize<'de>,
            S: BuildHasher + Default,
        {
            type Value = CuckooMap<K, V, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                // No capacity hint: the tables size themselves through rehashing.
                let mut values = CuckooMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }

                Ok(values)
            }
        }

        let visitor = MapVisitor {
            marker: PhantomData,
        };
        deserializer.deserialize_map(visitor)
    }
}

impl<T, H> Serialize for CuckooSet<T, H>
where
    T: Serialize,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

impl<'de, T, S> Deserialize<'de> for CuckooSet<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T, S> {
            marker: PhantomData<CuckooSet<T, S>>,
        }

        impl<'de, T, S> Visitor<'de> for SeqVisitor<T, S>
        where
            T: Deserialize<'de> + Eq + Hash,
            S: BuildHasher + Default,
        {
            type Value = CuckooSet<T, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = CuckooSet::new();
                while let Some(value) = seq.next_element()? {
                    values.insert(value);
                }

                Ok(values)
            }
        }

        let visitor = SeqVisitor {
            marker: PhantomData,
        };
        deserializer.deserialize_seq(visitor)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "Params")]
struct ParamsRepr {
    epsilon: f64,
    downsize_threshold: f32,
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ParamsRepr {
            epsilon: self.epsilon(),
            downsize_threshold: self.downsize_threshold(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = ParamsRepr::deserialize(deserializer)?;
        Params::new(repr.epsilon, repr.downsize_threshold).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CuckooMap, CuckooSet, Params};

    #[test]
    fn map_round_trip() {
        let map: CuckooMap<String, u32> = (0..20).map(|i| (format!("k{i}"), i)).collect();
        let json = serde_json::to_string(&map).unwrap();
        let back: CuckooMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    fn set_is_a_sequence() {
        let set: CuckooSet<u8> = [4].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[4]");
        let back: CuckooSet<u8> = serde_json::from_str("[1, 2, 2, 3]").unwrap();
        assert_eq!(back.len(), 3);
    }

    #[test]
    fn params_are_validated() {
        let params: Params =
            serde_json::from_str(r#"{"epsilon":0.3,"downsize_threshold":0.25}"#).unwrap();
        assert_eq!(params, Params::new(0.3, 0.25).unwrap());
        assert!(
            serde_json::from_str::<Params>(r#"{"epsilon":0.0,"downsize_threshold":0.2}"#).is_err()
        );
    }
}
